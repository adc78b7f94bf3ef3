use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, SkillsRepo},
    domain::{
        content::SkillDraft,
        entities::SkillRecord,
        types::{SkillCategory, SkillLevel},
    },
};

use super::{PostgresRepositories, map_sqlx_error};

const SKILL_COLUMNS: &str = "id, name, description, specialities, level, category, \
     years_of_experience, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct SkillRow {
    id: Uuid,
    name: String,
    description: String,
    specialities: Vec<String>,
    level: SkillLevel,
    category: SkillCategory,
    years_of_experience: i16,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<SkillRow> for SkillRecord {
    fn from(row: SkillRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            specialities: row.specialities,
            level: row.level,
            category: row.category,
            years_of_experience: row.years_of_experience,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SkillsRepo for PostgresRepositories {
    async fn list_skills(
        &self,
        category: Option<SkillCategory>,
    ) -> Result<Vec<SkillRecord>, RepoError> {
        let sql = format!(
            "SELECT {SKILL_COLUMNS} FROM technical_skills \
             WHERE ($1::skill_category IS NULL OR category = $1) \
             ORDER BY category, years_of_experience DESC, name, id"
        );
        let rows = sqlx::query_as::<_, SkillRow>(&sql)
            .bind(category)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SkillRecord::from).collect())
    }

    async fn create_skill(&self, draft: SkillDraft) -> Result<SkillRecord, RepoError> {
        let sql = format!(
            "INSERT INTO technical_skills (id, name, description, specialities, level, \
                                           category, years_of_experience) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {SKILL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SkillRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(draft.name)
            .bind(draft.description)
            .bind(draft.specialities)
            .bind(draft.level)
            .bind(draft.category)
            .bind(draft.years_of_experience)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_skill(&self, id: Uuid, draft: SkillDraft) -> Result<SkillRecord, RepoError> {
        let sql = format!(
            "UPDATE technical_skills SET \
                 name = $2, description = $3, specialities = $4, level = $5, \
                 category = $6, years_of_experience = $7, updated_at = now() \
             WHERE id = $1 \
             RETURNING {SKILL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SkillRow>(&sql)
            .bind(id)
            .bind(draft.name)
            .bind(draft.description)
            .bind(draft.specialities)
            .bind(draft.level)
            .bind(draft.category)
            .bind(draft.years_of_experience)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_skill(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM technical_skills WHERE id = $1")
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
