//! Store error type.

use shelf_gateway::FetchError;

/// Why a load ended without new data.
///
/// Gateway failures of every kind collapse into this one variant; the store
/// surfaces it through the `has_error` flag, never as a returned `Err`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Product fetch failed: {0}")]
    FetchFailed(String),
}

impl From<FetchError> for StoreError {
    fn from(e: FetchError) -> Self {
        StoreError::FetchFailed(e.to_string())
    }
}
