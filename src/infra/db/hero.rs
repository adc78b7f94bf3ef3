use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{HeroRepo, RepoError},
    domain::{content::HeroContent, entities::HeroRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct HeroRow {
    name: String,
    rank: String,
    title: String,
    subtitle: String,
    resume_link: String,
    contact_link: String,
    image_urls: Vec<String>,
    hobbies: Vec<String>,
    updated_at: OffsetDateTime,
}

impl From<HeroRow> for HeroRecord {
    fn from(row: HeroRow) -> Self {
        Self {
            name: row.name,
            rank: row.rank,
            title: row.title,
            subtitle: row.subtitle,
            resume_link: row.resume_link,
            contact_link: row.contact_link,
            image_urls: row.image_urls,
            hobbies: row.hobbies,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl HeroRepo for PostgresRepositories {
    async fn load_hero(&self) -> Result<Option<HeroRecord>, RepoError> {
        let row = sqlx::query_as::<_, HeroRow>(
            r#"
            SELECT name, rank, title, subtitle, resume_link, contact_link,
                   image_urls, hobbies, updated_at
            FROM hero
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(HeroRecord::from))
    }

    async fn save_hero(&self, content: HeroContent) -> Result<HeroRecord, RepoError> {
        let row = sqlx::query_as::<_, HeroRow>(
            r#"
            INSERT INTO hero (id, name, rank, title, subtitle, resume_link, contact_link,
                              image_urls, hobbies, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, now())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                rank = EXCLUDED.rank,
                title = EXCLUDED.title,
                subtitle = EXCLUDED.subtitle,
                resume_link = EXCLUDED.resume_link,
                contact_link = EXCLUDED.contact_link,
                image_urls = EXCLUDED.image_urls,
                hobbies = EXCLUDED.hobbies,
                updated_at = now()
            RETURNING name, rank, title, subtitle, resume_link, contact_link,
                      image_urls, hobbies, updated_at
            "#,
        )
        .bind(content.name)
        .bind(content.rank)
        .bind(content.title)
        .bind(content.subtitle)
        .bind(content.resume_link)
        .bind(content.contact_link)
        .bind(content.image_urls)
        .bind(content.hobbies)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}
