//! Request and response types for the folio content API.
//!
//! These are the JSON shapes exchanged with the portfolio front-ends. Field
//! names follow the wire format the web and CMS clients already consume.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// ============================================================================
// Hero
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroDto {
    pub name: String,
    pub rank: String,
    pub title: String,
    pub subtitle: String,
    pub resume_link: String,
    pub contact_link: String,
    pub image_urls: Vec<String>,
    pub hobbies: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroUpdateRequest {
    pub name: String,
    #[serde(default)]
    pub rank: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub resume_link: String,
    #[serde(default)]
    pub contact_link: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
}

// ============================================================================
// About
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutCardDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutDto {
    pub description: String,
    pub cards: Vec<AboutCardDto>,
    pub github_link: String,
    pub linkedin_link: String,
    pub available: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutUpdateRequest {
    pub description: String,
    #[serde(default)]
    pub cards: Vec<AboutCardDto>,
    #[serde(default)]
    pub github_link: String,
    #[serde(default)]
    pub linkedin_link: String,
    #[serde(default)]
    pub available: bool,
}

// ============================================================================
// Technical skills
// ============================================================================

/// `level` is one of `Beginner`, `Intermediate`, `Advanced`; `category` is
/// one of `Backend`, `Frontend`, `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub specialities: Vec<String>,
    pub level: String,
    pub category: String,
    pub years_of_experience: i16,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillWriteRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specialities: Vec<String>,
    pub level: String,
    pub category: String,
    #[serde(default)]
    pub years_of_experience: i16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListResponse {
    pub items: Vec<SkillDto>,
}

// ============================================================================
// Career journey
// ============================================================================

/// `type` is `Education` or `Job`. Dates are display labels, not timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub affiliation: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub started_at: String,
    pub ended_at: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerWriteRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub affiliation: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub started_at: String,
    #[serde(default)]
    pub ended_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerListResponse {
    pub items: Vec<CareerDto>,
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWriteRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub items: Vec<ProjectDto>,
}

// ============================================================================
// Testimonials
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonialDto {
    pub id: Uuid,
    pub name: String,
    pub profile_url: String,
    pub affiliation: String,
    pub rating: i16,
    pub description: String,
    pub approved: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialSubmitRequest {
    pub name: String,
    pub profile_url: Option<String>,
    #[serde(default)]
    pub affiliation: String,
    pub rating: i16,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialApprovalRequest {
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialListResponse {
    pub items: Vec<TestimonialDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonyPageDto {
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonyPageUpdateRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
