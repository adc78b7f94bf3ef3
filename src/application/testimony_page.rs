use std::sync::Arc;

use crate::application::error::ContentError;
use crate::application::repos::TestimonyPageRepo;
use crate::domain::content::TestimonyPageContent;
use crate::domain::entities::TestimonyPageRecord;

#[derive(Clone)]
pub struct TestimonyPageService {
    repo: Arc<dyn TestimonyPageRepo>,
}

impl TestimonyPageService {
    pub fn new(repo: Arc<dyn TestimonyPageRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(&self) -> Result<TestimonyPageRecord, ContentError> {
        self.repo
            .load_testimony_page()
            .await?
            .ok_or_else(|| ContentError::not_found("testimony page"))
    }

    pub async fn update(
        &self,
        content: TestimonyPageContent,
    ) -> Result<TestimonyPageRecord, ContentError> {
        content.validate()?;
        Ok(self.repo.save_testimony_page(content).await?)
    }
}
