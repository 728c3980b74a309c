pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod negotiate;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::Json;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Open Badges API",
        version = "1.0.0",
        description = "Resolves Open Badges objects stored in a linked-data repository"
    ),
    paths(
        handlers::assertion::get_assertion,
        handlers::assertion::list_assertion_choices,
        handlers::badge_class::get_badge_class,
        handlers::badge_class::list_badge_classes,
        handlers::criteria::get_criteria,
        handlers::issuer::get_issuer,
        handlers::image::get_badge_image,
        handlers::image::get_assertion_image,
    ),
    components(schemas(error::ErrorBody)),
    tags(
        (name = "Assertions", description = "Issued badge assertions"),
        (name = "Badge Classes", description = "Badge definitions and their criteria"),
        (name = "Issuer", description = "The issuing organization"),
        (name = "Images", description = "Badge and assertion images"),
    ),
)]
struct ApiDoc;

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins = if cors.allow_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allow_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(origins)
        .max_age(Duration::from_secs(cors.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();
    let cors = cors_layer(&state.config.server.cors);

    routes::routes()
        .route(
            "/api-docs/openapi.json",
            get({
                let api = api.clone();
                move || async move { Json(api) }
            }),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(Scalar::with_url("/scalar", api))
}
