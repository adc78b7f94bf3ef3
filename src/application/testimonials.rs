use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::ContentError;
use crate::application::repos::{RepoError, TestimonialScope, TestimonialsRepo};
use crate::domain::content::TestimonialDraft;
use crate::domain::entities::TestimonialRecord;

const ENTITY: &str = "testimonial";

#[derive(Clone)]
pub struct TestimonialService {
    repo: Arc<dyn TestimonialsRepo>,
}

impl TestimonialService {
    pub fn new(repo: Arc<dyn TestimonialsRepo>) -> Self {
        Self { repo }
    }

    /// Approved testimonials only.
    pub async fn list_public(&self) -> Result<Vec<TestimonialRecord>, ContentError> {
        Ok(self
            .repo
            .list_testimonials(TestimonialScope::Approved)
            .await?)
    }

    pub async fn list_all(&self) -> Result<Vec<TestimonialRecord>, ContentError> {
        Ok(self.repo.list_testimonials(TestimonialScope::All).await?)
    }

    /// New submissions stay hidden until an administrator approves them.
    pub async fn submit(&self, draft: TestimonialDraft) -> Result<TestimonialRecord, ContentError> {
        draft.validate()?;
        Ok(self.repo.create_testimonial(draft).await?)
    }

    pub async fn set_approval(
        &self,
        id: Uuid,
        approved: bool,
    ) -> Result<TestimonialRecord, ContentError> {
        self.repo
            .set_approval(id, approved)
            .await
            .map_err(not_found_as_domain)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        self.repo
            .delete_testimonial(id)
            .await
            .map_err(not_found_as_domain)
    }
}

fn not_found_as_domain(err: RepoError) -> ContentError {
    match err {
        RepoError::NotFound => ContentError::not_found(ENTITY),
        other => other.into(),
    }
}
