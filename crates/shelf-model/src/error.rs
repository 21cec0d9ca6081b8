//! Model error types.

use thiserror::Error;

/// Errors that can occur while building or decoding catalog data.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Currency code not in the supported set.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Price value cannot be represented in minor units.
    #[error("Invalid price value: {0}")]
    InvalidPrice(f64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::SerializationError(e.to_string())
    }
}
