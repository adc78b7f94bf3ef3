use axum::Json;
use axum::extract::State;
use folio_api_types::{AboutDto, AboutUpdateRequest};

use crate::domain::content::AboutContent;
use crate::infra::http::error::ApiError;
use crate::infra::http::state::HttpState;

use super::{about_cards, about_to_dto};

pub async fn get_about(State(state): State<HttpState>) -> Result<Json<AboutDto>, ApiError> {
    let record = state.about.get().await?;
    Ok(Json(about_to_dto(record)))
}

pub async fn update_about(
    State(state): State<HttpState>,
    Json(request): Json<AboutUpdateRequest>,
) -> Result<Json<AboutDto>, ApiError> {
    let content = AboutContent {
        description: request.description,
        cards: about_cards(request.cards),
        github_link: request.github_link,
        linkedin_link: request.linkedin_link,
        available: request.available,
    };
    let record = state.about.update(content).await?;
    Ok(Json(about_to_dto(record)))
}
