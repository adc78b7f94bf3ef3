//! Testimonial handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use folio_api_types::{
    TestimonialApprovalRequest, TestimonialDto, TestimonialListResponse,
    TestimonialSubmitRequest, TestimonyPageDto, TestimonyPageUpdateRequest,
};
use uuid::Uuid;

use crate::domain::content::{TestimonialDraft, TestimonyPageContent};
use crate::infra::http::error::ApiError;
use crate::infra::http::state::HttpState;

use super::{testimonial_to_dto, testimony_page_to_dto};

pub async fn list_testimonials(
    State(state): State<HttpState>,
) -> Result<Json<TestimonialListResponse>, ApiError> {
    let records = state.testimonials.list_public().await?;
    Ok(Json(TestimonialListResponse {
        items: records.into_iter().map(testimonial_to_dto).collect(),
    }))
}

pub async fn list_all_testimonials(
    State(state): State<HttpState>,
) -> Result<Json<TestimonialListResponse>, ApiError> {
    let records = state.testimonials.list_all().await?;
    Ok(Json(TestimonialListResponse {
        items: records.into_iter().map(testimonial_to_dto).collect(),
    }))
}

pub async fn submit_testimonial(
    State(state): State<HttpState>,
    Json(request): Json<TestimonialSubmitRequest>,
) -> Result<(StatusCode, Json<TestimonialDto>), ApiError> {
    let draft = TestimonialDraft::new(
        request.name,
        request.profile_url,
        request.affiliation,
        request.rating,
        request.description,
    );
    let record = state.testimonials.submit(draft).await?;
    Ok((StatusCode::CREATED, Json(testimonial_to_dto(record))))
}

pub async fn set_approval(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TestimonialApprovalRequest>,
) -> Result<Json<TestimonialDto>, ApiError> {
    let record = state
        .testimonials
        .set_approval(id, request.approved)
        .await?;
    Ok(Json(testimonial_to_dto(record)))
}

pub async fn delete_testimonial(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.testimonials.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_testimony_page(
    State(state): State<HttpState>,
) -> Result<Json<TestimonyPageDto>, ApiError> {
    let record = state.testimony_page.get().await?;
    Ok(Json(testimony_page_to_dto(record)))
}

pub async fn update_testimony_page(
    State(state): State<HttpState>,
    Json(request): Json<TestimonyPageUpdateRequest>,
) -> Result<Json<TestimonyPageDto>, ApiError> {
    let content = TestimonyPageContent {
        title: request.title,
        description: request.description,
    };
    let record = state.testimony_page.update(content).await?;
    Ok(Json(testimony_page_to_dto(record)))
}
