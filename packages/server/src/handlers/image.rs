use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::Response;
use graph::ImageSource;
use tracing::instrument;

use crate::error::{AppError, CallSite, ErrorBody};
use crate::state::AppState;
use crate::utils::path::split_extension;

#[utoipa::path(
    get,
    path = "/BadgeImage/{badge}.png",
    tag = "Images",
    operation_id = "getBadgeImage",
    summary = "Proxy the image of a badge class",
    description = "Fetches the image stored next to the badge class object and streams it back unchanged. Lookup failures answer 501, image host failures 500.",
    params(("badge" = String, Path, description = "Badge class name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Badge class not found", body = ErrorBody),
        (status = 500, description = "Image host failure (IMAGE_FETCH_FAILED)", body = ErrorBody),
        (status = 501, description = "Repository failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_badge_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let badge = png_stem(&file)?;
    proxy_image(&state, ImageSource::from_params(Some(badge), None)).await
}

#[utoipa::path(
    get,
    path = "/AssertionImage/{uid}.png",
    tag = "Images",
    operation_id = "getAssertionImage",
    summary = "Proxy the image of an issued assertion",
    description = "Looks up the image recorded for the assertion and streams it back unchanged. Lookup failures answer 501, image host failures 500.",
    params(("uid" = String, Path, description = "Assertion identifier")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 400, description = "Invalid identifier (INVALID_IDENTIFIER)", body = ErrorBody),
        (status = 404, description = "No image recorded (IMAGE_NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Image host failure (IMAGE_FETCH_FAILED)", body = ErrorBody),
        (status = 501, description = "Repository failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_assertion_image(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    let uid = png_stem(&file)?;
    proxy_image(&state, ImageSource::from_params(None, Some(uid))).await
}

fn png_stem(file: &str) -> Result<&str, AppError> {
    match split_extension(file, "png") {
        (stem, true) => Ok(stem),
        _ => Err(AppError::NotFound(format!("No image route for '{file}'"))),
    }
}

async fn proxy_image(
    state: &AppState,
    source: Result<ImageSource, graph::GraphError>,
) -> Result<Response, AppError> {
    let to_app_error = AppError::at(CallSite::ImageLookup);
    let source = source.map_err(&to_app_error)?;
    let image = state.images.resolve(&source).await.map_err(&to_app_error)?;

    Response::builder()
        .header(header::CONTENT_TYPE, image.content_type)
        .body(Body::from_stream(image.response.bytes_stream()))
        .map_err(|e| AppError::Internal(e.to_string()))
}
