use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::ContentError;
use crate::application::repos::{CareersRepo, RepoError};
use crate::domain::content::CareerDraft;
use crate::domain::entities::CareerRecord;

const ENTITY: &str = "career";

#[derive(Clone)]
pub struct CareerService {
    repo: Arc<dyn CareersRepo>,
}

impl CareerService {
    pub fn new(repo: Arc<dyn CareersRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<CareerRecord>, ContentError> {
        Ok(self.repo.list_careers().await?)
    }

    pub async fn create(&self, draft: CareerDraft) -> Result<CareerRecord, ContentError> {
        draft.validate()?;
        Ok(self.repo.create_career(draft).await?)
    }

    pub async fn update(&self, id: Uuid, draft: CareerDraft) -> Result<CareerRecord, ContentError> {
        draft.validate()?;
        self.repo
            .update_career(id, draft)
            .await
            .map_err(not_found_as_domain)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        self.repo
            .delete_career(id)
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
