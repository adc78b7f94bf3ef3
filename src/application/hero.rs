use std::sync::Arc;

use crate::application::error::ContentError;
use crate::application::repos::HeroRepo;
use crate::domain::content::HeroContent;
use crate::domain::entities::HeroRecord;

#[derive(Clone)]
pub struct HeroService {
    repo: Arc<dyn HeroRepo>,
}

impl HeroService {
    pub fn new(repo: Arc<dyn HeroRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self) -> Result<HeroRecord, ContentError> {
        self.repo
            .load_hero()
            .await?
            .ok_or_else(|| ContentError::not_found("hero"))
    }

    pub async fn update(&self, content: HeroContent) -> Result<HeroRecord, ContentError> {
        content.validate()?;
        Ok(self.repo.save_hero(content).await?)
    }
}
