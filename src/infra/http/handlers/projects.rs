//! Project handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use folio_api_types::{ProjectDto, ProjectListQuery, ProjectListResponse, ProjectWriteRequest};
use uuid::Uuid;

use crate::infra::http::error::ApiError;
use crate::infra::http::state::HttpState;

use super::{project_draft, project_to_dto};

pub async fn list_projects(
    State(state): State<HttpState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let records = state.projects.list(query.category.as_deref()).await?;
    Ok(Json(ProjectListResponse {
        items: records.into_iter().map(project_to_dto).collect(),
    }))
}

pub async fn get_project(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectDto>, ApiError> {
    let record = state.projects.get(id).await?;
    Ok(Json(project_to_dto(record)))
}

pub async fn create_project(
    State(state): State<HttpState>,
    Json(request): Json<ProjectWriteRequest>,
) -> Result<(StatusCode, Json<ProjectDto>), ApiError> {
    let record = state.projects.create(project_draft(request)).await?;
    Ok((StatusCode::CREATED, Json(project_to_dto(record))))
}

pub async fn update_project(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProjectWriteRequest>,
) -> Result<Json<ProjectDto>, ApiError> {
    let record = state.projects.update(id, project_draft(request)).await?;
    Ok(Json(project_to_dto(record)))
}

pub async fn delete_project(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.projects.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
