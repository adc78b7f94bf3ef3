use std::sync::Arc;

use uuid::Uuid;

use crate::application::error::ContentError;
use crate::application::repos::{RepoError, SkillsRepo};
use crate::domain::content::SkillDraft;
use crate::domain::entities::SkillRecord;
use crate::domain::types::SkillCategory;

const ENTITY: &str = "skill";

#[derive(Clone)]
pub struct SkillService {
    repo: Arc<dyn SkillsRepo>,
}

impl SkillService {
    pub fn new(repo: Arc<dyn SkillsRepo>) -> Self {
        Self { repo }
    }

    /// Skills, optionally narrowed to one category. A blank category lists
    /// everything; an unknown one is a validation error.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<SkillRecord>, ContentError> {
        let category = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(SkillCategory::parse)
            .transpose()?;
        Ok(self.repo.list_skills(category).await?)
    }

    pub async fn create(&self, draft: SkillDraft) -> Result<SkillRecord, ContentError> {
        draft.validate()?;
        Ok(self.repo.create_skill(draft).await?)
    }

    pub async fn update(&self, id: Uuid, draft: SkillDraft) -> Result<SkillRecord, ContentError> {
        draft.validate()?;
        self.repo
            .update_skill(id, draft)
            .await
            .map_err(not_found_as_domain)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        self.repo.delete_skill(id).await.map_err(not_found_as_domain)
    }
}

fn not_found_as_domain(err: RepoError) -> ContentError {
    match err {
        RepoError::NotFound => ContentError::not_found(ENTITY),
        other => other.into(),
    }
}
