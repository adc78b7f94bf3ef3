use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{RepoError, TestimonyPageRepo},
    domain::{content::TestimonyPageContent, entities::TestimonyPageRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct TestimonyPageRow {
    title: String,
    description: String,
    updated_at: OffsetDateTime,
}

impl From<TestimonyPageRow> for TestimonyPageRecord {
    fn from(row: TestimonyPageRow) -> Self {
        Self {
            title: row.title,
            description: row.description,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TestimonyPageRepo for PostgresRepositories {
    async fn load_testimony_page(&self) -> Result<Option<TestimonyPageRecord>, RepoError> {
        let row = sqlx::query_as::<_, TestimonyPageRow>(
            "SELECT title, description, updated_at FROM testimony_page WHERE id = 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(TestimonyPageRecord::from))
    }

    async fn save_testimony_page(
        &self,
        content: TestimonyPageContent,
    ) -> Result<TestimonyPageRecord, RepoError> {
        let row = sqlx::query_as::<_, TestimonyPageRow>(
            r#"
            INSERT INTO testimony_page (id, title, description, updated_at)
            VALUES (1, $1, $2, now())
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                updated_at = now()
            RETURNING title, description, updated_at
            "#,
        )
        .bind(content.title)
        .bind(content.description)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
