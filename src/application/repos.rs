//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::content::{
    AboutContent, CareerDraft, HeroContent, ProjectDraft, SkillDraft, TestimonialDraft,
    TestimonyPageContent,
};
use crate::domain::entities::{
    AboutRecord, CareerRecord, HeroRecord, ProjectRecord, SkillRecord, TestimonialRecord,
    TestimonyPageRecord,
};
use crate::domain::types::SkillCategory;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait HeroRepo: Send + Sync {
    async fn load_hero(&self) -> Result<Option<HeroRecord>, RepoError>;

    /// Insert or replace the singleton hero content.
    async fn save_hero(&self, content: HeroContent) -> Result<HeroRecord, RepoError>;
}

#[async_trait]
pub trait AboutRepo: Send + Sync {
    async fn load_about(&self) -> Result<Option<AboutRecord>, RepoError>;

    async fn save_about(&self, content: AboutContent) -> Result<AboutRecord, RepoError>;
}

#[async_trait]
pub trait SkillsRepo: Send + Sync {
    async fn list_skills(
        &self,
        category: Option<SkillCategory>,
    ) -> Result<Vec<SkillRecord>, RepoError>;

    async fn create_skill(&self, draft: SkillDraft) -> Result<SkillRecord, RepoError>;

    /// Fails with [`RepoError::NotFound`] when `id` does not exist.
    async fn update_skill(&self, id: Uuid, draft: SkillDraft) -> Result<SkillRecord, RepoError>;

    async fn delete_skill(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CareersRepo: Send + Sync {
    async fn list_careers(&self) -> Result<Vec<CareerRecord>, RepoError>;

    async fn create_career(&self, draft: CareerDraft) -> Result<CareerRecord, RepoError>;

    async fn update_career(&self, id: Uuid, draft: CareerDraft)
    -> Result<CareerRecord, RepoError>;

    async fn delete_career(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ProjectsRepo: Send + Sync {
    async fn list_projects(&self, category: Option<&str>)
    -> Result<Vec<ProjectRecord>, RepoError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepoError>;

    async fn create_project(&self, draft: ProjectDraft) -> Result<ProjectRecord, RepoError>;

    /// Fails with [`RepoError::NotFound`] when `id` does not exist.
    async fn update_project(
        &self,
        id: Uuid,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, RepoError>;

    async fn delete_project(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Which testimonials a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestimonialScope {
    Approved,
    All,
}

#[async_trait]
pub trait TestimonialsRepo: Send + Sync {
    async fn list_testimonials(
        &self,
        scope: TestimonialScope,
    ) -> Result<Vec<TestimonialRecord>, RepoError>;

    /// Stores a new, unapproved testimonial.
    async fn create_testimonial(
        &self,
        draft: TestimonialDraft,
    ) -> Result<TestimonialRecord, RepoError>;

    async fn set_approval(&self, id: Uuid, approved: bool)
    -> Result<TestimonialRecord, RepoError>;

    async fn delete_testimonial(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait TestimonyPageRepo: Send + Sync {
    async fn load_testimony_page(&self) -> Result<Option<TestimonyPageRecord>, RepoError>;

    async fn save_testimony_page(
        &self,
        content: TestimonyPageContent,
    ) -> Result<TestimonyPageRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), RepoError>;
}
