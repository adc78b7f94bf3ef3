//! HTTP surface: routes, cache decorators and shared middleware.

mod error;
pub mod handlers;
mod middleware;
mod state;

pub use error::{ApiError, ApiErrorBody, ApiErrorMessage, codes};
pub use middleware::{AdminToken, RequestContext, cors_layer};
pub use state::HttpState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tower_http::cors::CorsLayer;

use crate::cache::{CacheLayers, KeySpec, invalidate_on_success, read_through};

pub const HERO_KEY: &str = "hero";
pub const ABOUT_KEY: &str = "about";
pub const SKILLS_FAMILY: &str = "skills";
pub const CAREERS_FAMILY: &str = "careers";
pub const PROJECTS_FAMILY: &str = "projects";
pub const TESTIMONIALS_FAMILY: &str = "testimonials";
pub const TESTIMONY_PAGE_KEY: &str = "testimony_page";

/// Query parameters that vary the cached listings.
const CATEGORY_PARAMS: &[&str] = &["category"];

/// Router-level settings that are not part of handler state.
#[derive(Clone)]
pub struct RouterOptions {
    pub admin_token: AdminToken,
    pub cors: CorsLayer,
}

pub fn build_router(state: HttpState, cache: &CacheLayers, options: RouterOptions) -> Router {
    let cached = |key: KeySpec| {
        axum_middleware::from_fn_with_state(cache.read_through(key), read_through)
    };
    let invalidates_key = |key: &str| {
        axum_middleware::from_fn_with_state(cache.invalidate_key(key), invalidate_on_success)
    };
    let invalidates_family = |base: &str| {
        axum_middleware::from_fn_with_state(cache.invalidate_family(base), invalidate_on_success)
    };

    let public = Router::new()
        .route(
            "/api/hero",
            get(handlers::get_hero).layer(cached(KeySpec::fixed(HERO_KEY))),
        )
        .route(
            "/api/about",
            get(handlers::get_about).layer(cached(KeySpec::fixed(ABOUT_KEY))),
        )
        .route(
            "/api/about/skills",
            get(handlers::list_skills).layer(cached(KeySpec::parametrized(
                SKILLS_FAMILY,
                CATEGORY_PARAMS,
            ))),
        )
        .route(
            "/api/about/careers",
            get(handlers::list_careers).layer(cached(KeySpec::parametrized(CAREERS_FAMILY, &[]))),
        )
        .route(
            "/api/projects",
            get(handlers::list_projects).layer(cached(KeySpec::parametrized(
                PROJECTS_FAMILY,
                CATEGORY_PARAMS,
            ))),
        )
        .route("/api/projects/{id}", get(handlers::get_project))
        .route(
            "/api/testimonials",
            get(handlers::list_testimonials)
                .layer(cached(KeySpec::parametrized(TESTIMONIALS_FAMILY, &[])))
                .post(handlers::submit_testimonial),
        )
        .route(
            "/api/testimonials/page",
            get(handlers::get_testimony_page).layer(cached(KeySpec::fixed(TESTIMONY_PAGE_KEY))),
        )
        .route("/_health", get(handlers::health));

    let admin = Router::new()
        .route(
            "/api/admin/hero",
            put(handlers::update_hero).layer(invalidates_key(HERO_KEY)),
        )
        .route(
            "/api/admin/about",
            put(handlers::update_about).layer(invalidates_key(ABOUT_KEY)),
        )
        .route(
            "/api/admin/skills",
            post(handlers::create_skill).layer(invalidates_family(SKILLS_FAMILY)),
        )
        .route(
            "/api/admin/skills/{id}",
            put(handlers::update_skill)
                .delete(handlers::delete_skill)
                .layer(invalidates_family(SKILLS_FAMILY)),
        )
        .route(
            "/api/admin/careers",
            post(handlers::create_career).layer(invalidates_family(CAREERS_FAMILY)),
        )
        .route(
            "/api/admin/careers/{id}",
            put(handlers::update_career)
                .delete(handlers::delete_career)
                .layer(invalidates_family(CAREERS_FAMILY)),
        )
        .route(
            "/api/admin/projects",
            post(handlers::create_project).layer(invalidates_family(PROJECTS_FAMILY)),
        )
        .route(
            "/api/admin/projects/{id}",
            put(handlers::update_project)
                .delete(handlers::delete_project)
                .layer(invalidates_family(PROJECTS_FAMILY)),
        )
        .route(
            "/api/admin/testimonials",
            get(handlers::list_all_testimonials),
        )
        .route(
            "/api/admin/testimonials/page",
            put(handlers::update_testimony_page).layer(invalidates_key(TESTIMONY_PAGE_KEY)),
        )
        .route(
            "/api/admin/testimonials/{id}/approval",
            patch(handlers::set_approval).layer(invalidates_family(TESTIMONIALS_FAMILY)),
        )
        .route(
            "/api/admin/testimonials/{id}",
            axum::routing::delete(handlers::delete_testimonial)
                .layer(invalidates_family(TESTIMONIALS_FAMILY)),
        )
        // Authentication wraps invalidation: rejected writes never touch the cache.
        .route_layer(axum_middleware::from_fn_with_state(
            options.admin_token,
            middleware::admin_auth,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(options.cors)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
