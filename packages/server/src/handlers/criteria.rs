use axum::Json;
use axum::extract::{Path, State};
use graph::{ObjectKind, ResolvedObject};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, CallSite, ErrorBody};
use crate::models::badge::CriteriaResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/Criteria/{badge}",
    tag = "Badge Classes",
    operation_id = "getCriteria",
    summary = "Get the criteria of a badge class",
    description = "Returns the badge class name and its educational uses. Repository failures answer 503.",
    params(("badge" = String, Path, description = "Badge class name")),
    responses(
        (status = 200, description = "Badge criteria", body = CriteriaResponse),
        (status = 400, description = "Invalid identifier (INVALID_IDENTIFIER)", body = ErrorBody),
        (status = 404, description = "Badge class not found (NOT_FOUND)", body = ErrorBody),
        (status = 503, description = "Repository failure", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_criteria(
    State(state): State<AppState>,
    Path(badge): Path<String>,
) -> Result<Json<CriteriaResponse>, AppError> {
    let resolved = state
        .objects
        .fetch(ObjectKind::BadgeClass, &badge)
        .await
        .map_err(AppError::at(CallSite::BadgeClass))?;
    Ok(Json(criteria_of(&resolved)))
}

fn criteria_of(resolved: &ResolvedObject) -> CriteriaResponse {
    let name = resolved
        .object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(resolved.identifier.as_str());

    let educational_use = match resolved.object.get("educationalUse") {
        Some(Value::Array(items)) => items.iter().map(text_of).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![text_of(single)],
    };

    CriteriaResponse {
        name: format!("Criteria for {name}"),
        educational_use,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
