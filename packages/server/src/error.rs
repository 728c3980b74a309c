use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use graph::GraphError;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `INVALID_IDENTIFIER`, `INVALID_REQUEST`,
    /// `NOT_FOUND`, `IMAGE_NOT_FOUND`, `UNSUPPORTED_REPRESENTATION`, `REPOSITORY_ERROR`,
    /// `REPOSITORY_UNAVAILABLE`, `MALFORMED_PAYLOAD`, `AMBIGUOUS_RESULT`,
    /// `IMAGE_FETCH_FAILED`, `INTERNAL_ERROR`.
    #[schema(example = "NOT_FOUND")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Object not found: BadgeClass CampBadge")]
    pub message: String,
}

/// Where an upstream failure happened. Each site answers with its own status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    /// Assertion lookup: 505.
    Assertion,
    /// Badge-class and criteria lookup: 503.
    BadgeClass,
    /// Badge-class listing: 502.
    BadgeClassList,
    /// Image location, by badge class or by assertion: 501.
    ImageLookup,
}

impl CallSite {
    pub fn status(&self) -> StatusCode {
        match self {
            CallSite::Assertion => StatusCode::HTTP_VERSION_NOT_SUPPORTED,
            CallSite::BadgeClass => StatusCode::SERVICE_UNAVAILABLE,
            CallSite::BadgeClassList => StatusCode::BAD_GATEWAY,
            CallSite::ImageLookup => StatusCode::NOT_IMPLEMENTED,
        }
    }
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    InvalidIdentifier(String),
    InvalidRequest(String),
    NotFound(String),
    ImageNotFound(String),
    UnsupportedRepresentation(String),
    /// The repository failed or returned something unusable.
    Upstream {
        site: CallSite,
        code: &'static str,
        detail: String,
    },
    /// The image host failed. Always 500.
    ImageFetchFailed(String),
    Internal(String),
}

impl AppError {
    /// Attribute a resolution failure to the call site it happened at.
    pub fn at(site: CallSite) -> impl Fn(GraphError) -> AppError {
        move |err| AppError::from_graph(site, err)
    }

    pub fn from_graph(site: CallSite, err: GraphError) -> Self {
        let upstream = |code: &'static str, detail: String| AppError::Upstream {
            site,
            code,
            detail,
        };
        match err {
            GraphError::InvalidIdentifier(msg) => AppError::InvalidIdentifier(msg),
            GraphError::InvalidRequest(msg) => AppError::InvalidRequest(msg),
            GraphError::NotFound(msg) => {
                tracing::warn!("Not found: {msg}");
                AppError::NotFound(msg)
            }
            GraphError::ImageNotFound(msg) => {
                tracing::warn!("Image not found: {msg}");
                AppError::ImageNotFound(msg)
            }
            GraphError::ImageFetchFailed(msg) => AppError::ImageFetchFailed(msg),
            err @ GraphError::AmbiguousResult { .. } => {
                upstream("AMBIGUOUS_RESULT", err.to_string())
            }
            GraphError::MalformedPayload(msg) => upstream("MALFORMED_PAYLOAD", msg),
            err @ GraphError::Repository { .. } => upstream("REPOSITORY_ERROR", err.to_string()),
            GraphError::Transport(msg) => upstream("REPOSITORY_UNAVAILABLE", msg),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidIdentifier(_) | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) | AppError::ImageNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnsupportedRepresentation(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::Upstream { site, .. } => site.status(),
            AppError::ImageFetchFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let status = self.status();
        let body = match self {
            AppError::InvalidIdentifier(msg) => ErrorBody {
                code: "INVALID_IDENTIFIER",
                message: msg,
            },
            AppError::InvalidRequest(msg) => ErrorBody {
                code: "INVALID_REQUEST",
                message: msg,
            },
            AppError::NotFound(msg) => ErrorBody {
                code: "NOT_FOUND",
                message: msg,
            },
            AppError::ImageNotFound(msg) => ErrorBody {
                code: "IMAGE_NOT_FOUND",
                message: msg,
            },
            AppError::UnsupportedRepresentation(accept) => ErrorBody {
                code: "UNSUPPORTED_REPRESENTATION",
                message: format!(
                    "None of the accepted types ({accept}) can be produced; \
                     available: application/json, application/rdf+xml, text/html"
                ),
            },
            AppError::Upstream { site, code, detail } => {
                tracing::error!(?site, code, "Repository failure: {}", detail);
                ErrorBody {
                    code,
                    message: detail,
                }
            }
            AppError::ImageFetchFailed(detail) => {
                tracing::error!("Image fetch failed: {}", detail);
                ErrorBody {
                    code: "IMAGE_FETCH_FAILED",
                    message: "The badge image could not be retrieved".into(),
                }
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorBody {
                    code: "INTERNAL_ERROR",
                    message: "An unexpected error occurred".into(),
                }
            }
        };
        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
