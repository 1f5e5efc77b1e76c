//! Record integrity and pricing pipeline for Cartag vehicle records.
//!
//! This crate provides:
//! - The [`Record`] model addressed by an NFT token
//! - Canonical serialization ([`serialize`], [`parse`])
//! - SHA-256 record digests ([`digest`], [`verify`])
//! - A rule-based premium calculator driven by a [`RatingTable`]
//! - RSA-OAEP sealed envelopes ([`seal`], [`unseal`])
//!
//! Core invariants:
//! - Records are immutable; changing a field produces a new value
//! - Canonical bytes are identical for equal records, and both the digest
//!   and the envelope are computed over them
//! - Every operation is pure and synchronous; nothing here logs, retries or
//!   touches I/O
//!
#![deny(missing_docs)]

/// Canonical byte encoding of records.
pub mod canonical;
/// Sealed envelopes.
pub mod envelope;
/// Error types for core operations.
pub mod errors;
/// Record digests.
pub mod fingerprint;
/// Recipient key handles.
pub mod keys;
/// Premium calculator.
pub mod pricing;
/// Rating table configuration.
pub mod rating;
/// Vehicle/owner record model.
pub mod record;

pub use canonical::{parse, serialize};
pub use cartag_canonical::{Digest, DigestAlg, NftToken};
pub use envelope::{max_plaintext_len, seal, unseal, Envelope, SCHEME};
pub use errors::CoreError;
pub use fingerprint::{digest, verify};
pub use keys::{RecipientPrivateKey, RecipientPublicKey};
pub use pricing::{price, PremiumCalculator, Quote, Step};
pub use rating::{ExperienceTier, RatingTable, Rounding, RoundingMode, VehicleClass};
pub use record::{Record, RecordBuilder, VehicleHistory, DEFAULT_VEHICLE_TYPE};
pub use rust_decimal::Decimal;
