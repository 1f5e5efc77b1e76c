//! Record lookup for the cartag pipeline.
//!
//! This crate provides:
//! - `RecordLookup`, the seam between token-addressed views and a backend
//! - `MemoryStore`, an in-memory backend loadable from a JSON records file
//! - Token-addressed views that canonicalize, digest, price or seal the
//!   record registered under an NFT token
//! - The two demo records shipped with the CLI

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// In-memory record store.
pub mod memory;
/// Built-in demo records.
pub mod samples;
/// Record lookup trait.
pub mod traits;
/// Token-addressed views.
pub mod view;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use samples::sample_store;
pub use traits::RecordLookup;
pub use view::{
    canonical_for_token, digest_for_token, price_for_token, quote_for_token, resolve,
    seal_for_token, verify_for_token,
};
