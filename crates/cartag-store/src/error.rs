//! Error types for store operations.

use cartag_core::CoreError;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while loading or saving records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Record file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A second record claimed an existing token.
    #[error("duplicate token: {0}")]
    DuplicateToken(String),
    /// Error raised by the pipeline itself.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Whether the error is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::RecordNotFound(_)))
    }
}
