use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{ProjectsRepo, RepoError},
    domain::{content::ProjectDraft, entities::ProjectRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

const PROJECT_COLUMNS: &str = "id, title, description, category, tech_stack, repo_url, \
     live_url, image_url, featured, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    title: String,
    description: String,
    category: String,
    tech_stack: Vec<String>,
    repo_url: Option<String>,
    live_url: Option<String>,
    image_url: Option<String>,
    featured: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ProjectRow> for ProjectRecord {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            tech_stack: row.tech_stack,
            repo_url: row.repo_url,
            live_url: row.live_url,
            image_url: row.image_url,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProjectsRepo for PostgresRepositories {
    async fn list_projects(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<ProjectRecord>, RepoError> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE ($1::TEXT IS NULL OR category = $1) \
             ORDER BY featured DESC, created_at DESC, id"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(category)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProjectRecord::from).collect())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepoError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ProjectRecord::from))
    }

    async fn create_project(&self, draft: ProjectDraft) -> Result<ProjectRecord, RepoError> {
        let sql = format!(
            "INSERT INTO projects (id, title, description, category, tech_stack, repo_url, \
                                   live_url, image_url, featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.category)
            .bind(draft.tech_stack)
            .bind(draft.repo_url)
            .bind(draft.live_url)
            .bind(draft.image_url)
            .bind(draft.featured)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_project(
        &self,
        id: Uuid,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, RepoError> {
        let sql = format!(
            "UPDATE projects SET \
                 title = $2, description = $3, category = $4, tech_stack = $5, \
                 repo_url = $6, live_url = $7, image_url = $8, featured = $9, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .bind(draft.title)
            .bind(draft.description)
            .bind(draft.category)
            .bind(draft.tech_stack)
            .bind(draft.repo_url)
            .bind(draft.live_url)
            .bind(draft.image_url)
            .bind(draft.featured)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
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
