use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a required value is empty or blank.
    #[error("{field} must not be empty")]
    Empty {
        /// Field name that was empty.
        field: &'static str,
    },
}
