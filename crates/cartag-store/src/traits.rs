//! Lookup abstraction consumed by the token-addressed views.

use cartag_canonical::NftToken;
use cartag_core::Record;

use crate::error::StoreError;

/// Resolves NFT tokens to record snapshots.
///
/// Implementations return an owned copy; the caller treats it as immutable
/// for the rest of the operation. `Ok(None)` means the token is unknown,
/// `Err` means the backend itself failed.
pub trait RecordLookup {
    /// Looks up the record registered under `token`.
    fn lookup(&self, token: &NftToken) -> Result<Option<Record>, StoreError>;
}

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn lookup(&self, token: &NftToken) -> Result<Option<Record>, StoreError> {
        (**self).lookup(token)
    }
}
