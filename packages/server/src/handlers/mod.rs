pub mod assertion;
pub mod badge_class;
pub mod criteria;
pub mod image;
pub mod issuer;

use axum::http::{HeaderMap, header};
use axum::response::Response;
use graph::{ObjectKind, ResolvedObject};

use crate::error::{AppError, CallSite};
use crate::negotiate::{Representation, negotiate};
use crate::state::AppState;
use crate::utils::path::split_extension;

/// Resolve an object named by a path segment and render it as negotiated.
///
/// A `.json` suffix on the segment forces JSON regardless of `Accept`.
pub(crate) async fn negotiated_object(
    state: &AppState,
    kind: ObjectKind,
    site: CallSite,
    segment: &str,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let (identifier, json_suffix) = split_extension(segment, "json");
    let representation = if json_suffix {
        Representation::Json
    } else {
        negotiate(
            headers
                .get(header::ACCEPT)
                .and_then(|value| value.to_str().ok()),
        )?
    };

    let resolved: ResolvedObject = state
        .objects
        .fetch(kind, identifier)
        .await
        .map_err(AppError::at(site))?;

    representation.render(&resolved, &state.config.organization)
}
