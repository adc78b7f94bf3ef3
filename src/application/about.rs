use std::sync::Arc;

use crate::application::error::ContentError;
use crate::application::repos::AboutRepo;
use crate::domain::content::AboutContent;
use crate::domain::entities::AboutRecord;

#[derive(Clone)]
pub struct AboutService {
    repo: Arc<dyn AboutRepo>,
}

impl AboutService {
    pub fn new(repo: Arc<dyn AboutRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self) -> Result<AboutRecord, ContentError> {
        self.repo
            .load_about()
            .await?
            .ok_or_else(|| ContentError::not_found("about"))
    }

    pub async fn update(&self, content: AboutContent) -> Result<AboutRecord, ContentError> {
        content.validate()?;
        Ok(self.repo.save_about(content).await?)
    }
}
