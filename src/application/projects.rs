use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::ContentError;
use crate::application::repos::{ProjectsRepo, RepoError};
use crate::domain::content::ProjectDraft;
use crate::domain::entities::ProjectRecord;

const ENTITY: &str = "project";

#[derive(Clone)]
pub struct ProjectService {
    repo: Arc<dyn ProjectsRepo>,
}

impl ProjectService {
    pub fn new(repo: Arc<dyn ProjectsRepo>) -> Self {
        Self { repo }
    }

    /// Projects, optionally narrowed to one category. A blank category lists everything.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<ProjectRecord>, ContentError> {
        let category = category.map(str::trim).filter(|value| !value.is_empty());
        Ok(self.repo.list_projects(category).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<ProjectRecord, ContentError> {
        self.repo
            .find_project(id)
            .await?
            .ok_or_else(|| ContentError::not_found(ENTITY))
    }

    pub async fn create(&self, draft: ProjectDraft) -> Result<ProjectRecord, ContentError> {
        draft.validate()?;
        Ok(self.repo.create_project(draft).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, ContentError> {
        draft.validate()?;
        self.repo
            .update_project(id, draft)
            .await
            .map_err(not_found_as_domain)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        self.repo
            .delete_project(id)
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
