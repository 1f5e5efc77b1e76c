//! Content digests over canonical bytes.
//!
//! A digest is `sha256(canonical_bytes(value))` with no domain prefix, so it
//! can be reproduced by anyone holding the canonical document.

use serde::Serialize;

use crate::{to_canonical_bytes, CanonicalizationError, Digest};

/// Computes the SHA-256 digest of a value's canonical encoding.
///
/// # Example
///
/// ```rust
/// use cartag_canonical::compute_digest;
/// use serde_json::json;
///
/// let digest = compute_digest(&json!({"b": 2, "a": 1}))?;
/// assert_eq!(digest, compute_digest(&json!({"a": 1, "b": 2}))?);
/// assert_eq!(digest.to_hex().len(), 64);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`DigestError`] if the value cannot be canonicalized.
pub fn compute_digest<T: Serialize + ?Sized>(value: &T) -> Result<Digest, DigestError> {
    let bytes = to_canonical_bytes(value)?;
    Ok(Digest::sha256(&bytes))
}

/// Recomputes the digest of `value` and compares it byte-for-byte with
/// `claimed`.
pub fn verify_digest<T: Serialize + ?Sized>(
    value: &T,
    claimed: &Digest,
) -> Result<bool, DigestError> {
    let computed = compute_digest(value)?;
    Ok(computed.alg() == claimed.alg() && computed.as_bytes() == claimed.as_bytes())
}

/// Error during digest computation.
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}
