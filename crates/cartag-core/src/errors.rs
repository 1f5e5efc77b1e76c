use cartag_canonical::{CanonicalizationError, DigestError, ValidationError};
use thiserror::Error;

/// Core error types.
///
/// Every variant is terminal for the operation that raised it; nothing in
/// the core retries or returns partial results.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No record is registered under the token.
    #[error("record not found: {0}")]
    RecordNotFound(String),
    /// Record construction rejected the input.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// A value could not be encoded to, or decoded from, canonical form.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Ciphertext did not decrypt under the supplied key.
    #[error("decryption failed: {0}")]
    Decryption(String),
    /// Canonical bytes exceed what one RSA-OAEP block can carry.
    #[error("payload of {size} bytes exceeds the {max}-byte limit of the recipient key")]
    PayloadTooLarge {
        /// Canonical record size in bytes.
        size: usize,
        /// Maximum plaintext size for the key.
        max: usize,
    },
    /// A key could not be decoded, encoded or generated.
    #[error("key error: {0}")]
    Key(String),
    /// The rating table failed validation.
    #[error("invalid rating table: {0}")]
    InvalidRatingTable(String),
}

impl From<CanonicalizationError> for CoreError {
    fn from(err: CanonicalizationError) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<DigestError> for CoreError {
    fn from(err: DigestError) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::InvalidRecord(err.to_string())
    }
}
