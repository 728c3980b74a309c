use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use graph::{BadgeClassSummary, ObjectKind};
use tracing::instrument;

use crate::error::{AppError, CallSite, ErrorBody};
use crate::handlers::negotiated_object;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/Assertion/{uuid}",
    tag = "Assertions",
    operation_id = "getAssertion",
    summary = "Get an issued badge assertion",
    description = "Resolves the assertion stored under the sharded path derived from `uuid`. Append `.json` to force JSON; otherwise the representation follows `Accept` (`application/json`, `application/rdf+xml`, `text/html`). Repository failures answer 505.",
    params(("uuid" = String, Path, description = "Assertion identifier, optionally suffixed with `.json`")),
    responses(
        (status = 200, description = "Assertion in the negotiated representation", body = serde_json::Value),
        (status = 400, description = "Invalid identifier (INVALID_IDENTIFIER)", body = ErrorBody),
        (status = 404, description = "Assertion not found (NOT_FOUND)", body = ErrorBody),
        (status = 406, description = "No acceptable representation (UNSUPPORTED_REPRESENTATION)", body = ErrorBody),
        (status = 505, description = "Repository failure (REPOSITORY_ERROR, REPOSITORY_UNAVAILABLE, MALFORMED_PAYLOAD, AMBIGUOUS_RESULT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_assertion(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    negotiated_object(&state, ObjectKind::Assertion, CallSite::Assertion, &uuid, &headers).await
}

#[utoipa::path(
    get,
    path = "/Assertion/",
    tag = "Assertions",
    operation_id = "listAssertionChoices",
    summary = "List the badge classes an assertion can be issued for",
    description = "Returns the badge classes offered when issuing a new assertion. Repository failures answer 502.",
    responses(
        (status = 200, description = "Badge classes", body = Vec<BadgeClassSummary>),
        (status = 502, description = "Repository failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_assertion_choices(
    State(state): State<AppState>,
) -> Result<Json<Vec<BadgeClassSummary>>, AppError> {
    let classes = state
        .objects
        .badge_classes()
        .await
        .map_err(AppError::at(CallSite::BadgeClassList))?;
    Ok(Json(classes))
}
