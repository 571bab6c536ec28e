//! Storage-specific error types and conversions.

use smartads_core::error::SmartadsError;

/// Storage-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for SmartadsError {
    fn from(err: StoreError) -> Self {
        SmartadsError::Storage(err.to_string())
    }
}
