use async_trait::async_trait;
use sqlx::types::Json;
use time::OffsetDateTime;

use crate::{
    application::repos::{AboutRepo, RepoError},
    domain::{
        content::{AboutCard, AboutContent},
        entities::AboutRecord,
    },
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct AboutRow {
    description: String,
    cards: Json<Vec<AboutCard>>,
    github_link: String,
    linkedin_link: String,
    available: bool,
    updated_at: OffsetDateTime,
}

impl From<AboutRow> for AboutRecord {
    fn from(row: AboutRow) -> Self {
        Self {
            description: row.description,
            cards: row.cards.0,
            github_link: row.github_link,
            linkedin_link: row.linkedin_link,
            available: row.available,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl AboutRepo for PostgresRepositories {
    async fn load_about(&self) -> Result<Option<AboutRecord>, RepoError> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            SELECT description, cards, github_link, linkedin_link, available, updated_at
            FROM about
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(AboutRecord::from))
    }

    async fn save_about(&self, content: AboutContent) -> Result<AboutRecord, RepoError> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            INSERT INTO about (id, description, cards, github_link, linkedin_link, available,
                               updated_at)
            VALUES (1, $1, $2, $3, $4, $5, now())
            ON CONFLICT (id) DO UPDATE SET
                description = EXCLUDED.description,
                cards = EXCLUDED.cards,
                github_link = EXCLUDED.github_link,
                linkedin_link = EXCLUDED.linkedin_link,
                available = EXCLUDED.available,
                updated_at = now()
            RETURNING description, cards, github_link, linkedin_link, available, updated_at
            "#,
        )
        .bind(content.description)
        .bind(Json(content.cards))
        .bind(content.github_link)
        .bind(content.linkedin_link)
        .bind(content.available)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
