//! Gateway error type.

use std::time::Duration;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    /// Whether another attempt could succeed. A malformed feed stays malformed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Deserialization(_))
    }
}

impl From<shelf_model::ModelError> for FetchError {
    fn from(e: shelf_model::ModelError) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}
