//! Canonical encoding primitives for Cartag vehicle records.
//!
//! Every byte that participates in a record digest or an envelope passes
//! through this crate. The canonical form is JSON with object keys sorted
//! at every nesting level, no insignificant whitespace, raw UTF-8 strings
//! and integral numbers written without a fraction, so two logically-equal
//! values always encode to identical bytes.
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic encoding.
pub mod canonicalizer;
/// Content digests computed over canonical bytes.
pub mod content_id;
/// Digest type and algorithm identifiers.
pub mod digest;
/// Record identifiers.
pub mod identifiers;
/// Validation errors shared by canonical primitives.
pub mod validation;

pub use canonicalizer::{
    canonical_value, canonicalize, to_canonical_bytes, CanonicalizationError,
};
pub use content_id::{compute_digest, verify_digest, DigestError};
pub use digest::{Digest, DigestAlg, DIGEST_LEN};
pub use identifiers::NftToken;
pub use validation::ValidationError;
