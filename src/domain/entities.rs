//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::content::AboutCard;
use super::types::{CareerKind, SkillCategory, SkillLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroRecord {
    pub name: String,
    pub rank: String,
    pub title: String,
    pub subtitle: String,
    pub resume_link: String,
    pub contact_link: String,
    pub image_urls: Vec<String>,
    pub hobbies: Vec<String>,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutRecord {
    pub description: String,
    pub cards: Vec<AboutCard>,
    pub github_link: String,
    pub linkedin_link: String,
    pub available: bool,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialRecord {
    pub id: Uuid,
    pub name: String,
    pub profile_url: String,
    pub affiliation: String,
    pub rating: i16,
    pub description: String,
    pub approved: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonyPageRecord {
    pub title: String,
    pub description: String,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub specialities: Vec<String>,
    pub level: SkillLevel,
    pub category: SkillCategory,
    pub years_of_experience: i16,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub affiliation: String,
    pub location: String,
    pub kind: CareerKind,
    pub started_at: String,
    pub ended_at: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
