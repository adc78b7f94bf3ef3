use axum::Json;
use axum::extract::State;
use folio_api_types::{HeroDto, HeroUpdateRequest};

use crate::domain::content::HeroContent;
use crate::infra::http::error::ApiError;
use crate::infra::http::state::HttpState;

use super::hero_to_dto;

pub async fn get_hero(State(state): State<HttpState>) -> Result<Json<HeroDto>, ApiError> {
    let record = state.hero.get().await?;
    Ok(Json(hero_to_dto(record)))
}

pub async fn update_hero(
    State(state): State<HttpState>,
    Json(request): Json<HeroUpdateRequest>,
) -> Result<Json<HeroDto>, ApiError> {
    let content = HeroContent {
        name: request.name,
        rank: request.rank,
        title: request.title,
        subtitle: request.subtitle,
        resume_link: request.resume_link,
        contact_link: request.contact_link,
        image_urls: request.image_urls,
        hobbies: request.hobbies,
    };
    let record = state.hero.update(content).await?;
    Ok(Json(hero_to_dto(record)))
}
