use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use folio_api_types::{CareerDto, CareerListResponse, CareerWriteRequest};
use uuid::Uuid;

use crate::infra::http::error::ApiError;
use crate::infra::http::state::HttpState;

use super::{career_draft, career_to_dto};

pub async fn list_careers(
    State(state): State<HttpState>,
) -> Result<Json<CareerListResponse>, ApiError> {
    let records = state.careers.list().await?;
    Ok(Json(CareerListResponse {
        items: records.into_iter().map(career_to_dto).collect(),
    }))
}

pub async fn create_career(
    State(state): State<HttpState>,
    Json(request): Json<CareerWriteRequest>,
) -> Result<(StatusCode, Json<CareerDto>), ApiError> {
    let record = state.careers.create(career_draft(request)?).await?;
    Ok((StatusCode::CREATED, Json(career_to_dto(record))))
}

pub async fn update_career(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CareerWriteRequest>,
) -> Result<Json<CareerDto>, ApiError> {
    let record = state.careers.update(id, career_draft(request)?).await?;
    Ok(Json(career_to_dto(record)))
}

pub async fn delete_career(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.careers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
