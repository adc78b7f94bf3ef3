use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CareersRepo, RepoError},
    domain::{content::CareerDraft, entities::CareerRecord, types::CareerKind},
};

use super::{PostgresRepositories, map_sqlx_error};

const CAREER_COLUMNS: &str = "id, title, description, affiliation, location, kind, \
     started_at, ended_at, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CareerRow {
    id: Uuid,
    title: String,
    description: String,
    affiliation: String,
    location: String,
    kind: CareerKind,
    started_at: String,
    ended_at: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CareerRow> for CareerRecord {
    fn from(row: CareerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            affiliation: row.affiliation,
            location: row.location,
            kind: row.kind,
            started_at: row.started_at,
            ended_at: row.ended_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CareersRepo for PostgresRepositories {
    async fn list_careers(&self) -> Result<Vec<CareerRecord>, RepoError> {
        let sql =
            format!("SELECT {CAREER_COLUMNS} FROM career_journey ORDER BY created_at DESC, id");
        let rows = sqlx::query_as::<_, CareerRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CareerRecord::from).collect())
    }

    async fn create_career(&self, draft: CareerDraft) -> Result<CareerRecord, RepoError> {
        let sql = format!(
            "INSERT INTO career_journey (id, title, description, affiliation, location, kind, \
                                         started_at, ended_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CAREER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CareerRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.affiliation)
            .bind(draft.location)
            .bind(draft.kind)
            .bind(draft.started_at)
            .bind(draft.ended_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_career(
        &self,
        id: Uuid,
        draft: CareerDraft,
    ) -> Result<CareerRecord, RepoError> {
        let sql = format!(
            "UPDATE career_journey SET \
                 title = $2, description = $3, affiliation = $4, location = $5, kind = $6, \
                 started_at = $7, ended_at = $8, updated_at = now() \
             WHERE id = $1 \
             RETURNING {CAREER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CareerRow>(&sql)
            .bind(id)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.affiliation)
            .bind(draft.location)
            .bind(draft.kind)
            .bind(draft.started_at)
            .bind(draft.ended_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_career(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM career_journey WHERE id = $1")
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
