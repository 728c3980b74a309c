use thiserror::Error;

/// Errors raised while resolving an object out of the graph repository.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Ambiguous result: {count} bindings matched {subject}")]
    AmbiguousResult { subject: String, count: usize },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Repository responded with status {status}")]
    Repository { status: u16 },

    #[error("Repository transport error: {0}")]
    Transport(String),

    #[error("Image fetch failed: {0}")]
    ImageFetchFailed(String),
}

impl GraphError {
    /// True for failures caused by the repository rather than the caller.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            GraphError::AmbiguousResult { .. }
                | GraphError::MalformedPayload(_)
                | GraphError::Repository { .. }
                | GraphError::Transport(_)
        )
    }
}
