use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(assertion_routes())
        .merge(badge_class_routes())
        .merge(image_routes())
        .route("/Issuer", get(handlers::issuer::get_issuer))
}

fn assertion_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/Assertion/",
            get(handlers::assertion::list_assertion_choices),
        )
        .route("/Assertion/{uuid}", get(handlers::assertion::get_assertion))
}

fn badge_class_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/BadgeClass/",
            get(handlers::badge_class::list_badge_classes),
        )
        .route(
            "/BadgeClass/{slug}",
            get(handlers::badge_class::get_badge_class),
        )
        .route("/Criteria/{badge}", get(handlers::criteria::get_criteria))
}

// Path segments carry the `.png` suffix; handlers strip it.
fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/BadgeImage/{file}", get(handlers::image::get_badge_image))
        .route(
            "/AssertionImage/{file}",
            get(handlers::image::get_assertion_image),
        )
}
