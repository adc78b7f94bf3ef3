//! Technical skill handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use folio_api_types::{SkillDto, SkillListQuery, SkillListResponse, SkillWriteRequest};
use uuid::Uuid;

use crate::infra::http::error::ApiError;
use crate::infra::http::state::HttpState;

use super::{skill_draft, skill_to_dto};

pub async fn list_skills(
    State(state): State<HttpState>,
    Query(query): Query<SkillListQuery>,
) -> Result<Json<SkillListResponse>, ApiError> {
    let records = state.skills.list(query.category.as_deref()).await?;
    Ok(Json(SkillListResponse {
        items: records.into_iter().map(skill_to_dto).collect(),
    }))
}

pub async fn create_skill(
    State(state): State<HttpState>,
    Json(request): Json<SkillWriteRequest>,
) -> Result<(StatusCode, Json<SkillDto>), ApiError> {
    let record = state.skills.create(skill_draft(request)?).await?;
    Ok((StatusCode::CREATED, Json(skill_to_dto(record))))
}

pub async fn update_skill(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SkillWriteRequest>,
) -> Result<Json<SkillDto>, ApiError> {
    let record = state.skills.update(id, skill_draft(request)?).await?;
    Ok(Json(skill_to_dto(record)))
}

pub async fn delete_skill(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.skills.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
