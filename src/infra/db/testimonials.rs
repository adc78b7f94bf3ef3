use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, TestimonialScope, TestimonialsRepo},
    domain::{content::TestimonialDraft, entities::TestimonialRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct TestimonialRow {
    id: Uuid,
    name: String,
    profile_url: String,
    affiliation: String,
    rating: i16,
    description: String,
    approved: bool,
    created_at: OffsetDateTime,
}

impl From<TestimonialRow> for TestimonialRecord {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            profile_url: row.profile_url,
            affiliation: row.affiliation,
            rating: row.rating,
            description: row.description,
            approved: row.approved,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TestimonialsRepo for PostgresRepositories {
    async fn list_testimonials(
        &self,
        scope: TestimonialScope,
    ) -> Result<Vec<TestimonialRecord>, RepoError> {
        let approved_only = matches!(scope, TestimonialScope::Approved);
        let rows = sqlx::query_as::<_, TestimonialRow>(
            r#"
            SELECT id, name, profile_url, affiliation, rating, description, approved, created_at
            FROM testimonials
            WHERE approved OR NOT $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(approved_only)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TestimonialRecord::from).collect())
    }

    async fn create_testimonial(
        &self,
        draft: TestimonialDraft,
    ) -> Result<TestimonialRecord, RepoError> {
        let row = sqlx::query_as::<_, TestimonialRow>(
            r#"
            INSERT INTO testimonials (id, name, profile_url, affiliation, rating, description, approved)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE)
            RETURNING id, name, profile_url, affiliation, rating, description, approved, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(draft.name)
        .bind(draft.profile_url)
        .bind(draft.affiliation)
        .bind(draft.rating)
        .bind(draft.description)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn set_approval(
        &self,
        id: Uuid,
        approved: bool,
    ) -> Result<TestimonialRecord, RepoError> {
        let row = sqlx::query_as::<_, TestimonialRow>(
            r#"
            UPDATE testimonials SET approved = $2
            WHERE id = $1
            RETURNING id, name, profile_url, affiliation, rating, description, approved, created_at
            "#,
        )
        .bind(id)
        .bind(approved)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
