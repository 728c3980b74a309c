use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use graph::{BadgeClassSummary, ObjectKind};
use tracing::{info, instrument};

use crate::error::{AppError, CallSite, ErrorBody};
use crate::handlers::negotiated_object;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/BadgeClass/{slug}",
    tag = "Badge Classes",
    operation_id = "getBadgeClass",
    summary = "Get a badge class by name",
    description = "Resolves the badge class whose `schema:alternativeName` equals `slug`. Append `.json` to force JSON; otherwise the representation follows `Accept`. Repository failures answer 503.",
    params(("slug" = String, Path, description = "Badge class name, optionally suffixed with `.json`")),
    responses(
        (status = 200, description = "Badge class in the negotiated representation", body = serde_json::Value),
        (status = 400, description = "Invalid identifier (INVALID_IDENTIFIER)", body = ErrorBody),
        (status = 404, description = "Badge class not found (NOT_FOUND)", body = ErrorBody),
        (status = 406, description = "No acceptable representation (UNSUPPORTED_REPRESENTATION)", body = ErrorBody),
        (status = 503, description = "Repository failure (REPOSITORY_ERROR, REPOSITORY_UNAVAILABLE, MALFORMED_PAYLOAD, AMBIGUOUS_RESULT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_badge_class(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    negotiated_object(&state, ObjectKind::BadgeClass, CallSite::BadgeClass, &slug, &headers).await
}

#[utoipa::path(
    get,
    path = "/BadgeClass/",
    tag = "Badge Classes",
    operation_id = "listBadgeClasses",
    summary = "List badge classes",
    description = "Returns every badge class in the repository with its slug and display name. Repository failures answer 502.",
    responses(
        (status = 200, description = "Badge classes", body = Vec<BadgeClassSummary>),
        (status = 502, description = "Repository failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_badge_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<BadgeClassSummary>>, AppError> {
    let classes = state
        .objects
        .badge_classes()
        .await
        .map_err(AppError::at(CallSite::BadgeClassList))?;
    info!(count = classes.len(), "Listed badge classes");
    Ok(Json(classes))
}
