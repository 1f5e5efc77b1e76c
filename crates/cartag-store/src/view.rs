//! Token-addressed views over a [`RecordLookup`].
//!
//! Each view resolves the token exactly once and runs the pipeline step on
//! that snapshot. A token with no record is reported as
//! [`CoreError::RecordNotFound`], never as an empty result.

use cartag_canonical::{Digest, NftToken};
use cartag_core::{
    fingerprint, serialize, CoreError, Decimal, Envelope, PremiumCalculator, Quote,
    RecipientPublicKey, Record,
};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::traits::RecordLookup;

/// Resolves `token` to a record snapshot or fails with `RecordNotFound`.
pub fn resolve<L: RecordLookup + ?Sized>(lookup: &L, token: &str) -> Result<Record, StoreError> {
    let not_found = || StoreError::Core(CoreError::RecordNotFound(token.to_string()));
    let token = NftToken::parse(token).map_err(|_| not_found())?;
    match lookup.lookup(&token)? {
        Some(record) => {
            debug!(token = %token, "resolved record");
            Ok(record)
        }
        None => {
            debug!(token = %token, "no record for token");
            Err(not_found())
        }
    }
}

/// Canonical bytes of the record under `token`.
pub fn canonical_for_token<L: RecordLookup + ?Sized>(
    lookup: &L,
    token: &str,
) -> Result<Vec<u8>, StoreError> {
    let record = resolve(lookup, token)?;
    Ok(serialize(&record)?)
}

/// Digest of the record under `token`.
pub fn digest_for_token<L: RecordLookup + ?Sized>(
    lookup: &L,
    token: &str,
) -> Result<Digest, StoreError> {
    let record = resolve(lookup, token)?;
    let digest = fingerprint::digest(&record)?;
    info!(token, digest = %digest, "computed record digest");
    Ok(digest)
}

/// Checks `claimed` against the record under `token`.
pub fn verify_for_token<L: RecordLookup + ?Sized>(
    lookup: &L,
    token: &str,
    claimed: &Digest,
) -> Result<bool, StoreError> {
    let record = resolve(lookup, token)?;
    let matches = fingerprint::verify(&record, claimed)?;
    if matches {
        info!(token, "digest verified");
    } else {
        warn!(token, claimed = %claimed, "digest mismatch");
    }
    Ok(matches)
}

/// Premium for the record under `token`.
pub fn price_for_token<L: RecordLookup + ?Sized>(
    lookup: &L,
    calculator: &PremiumCalculator,
    token: &str,
) -> Result<Decimal, StoreError> {
    let record = resolve(lookup, token)?;
    let premium = calculator.price(&record);
    info!(token, premium = %premium, "priced record");
    Ok(premium)
}

/// Premium plus the factor trail for the record under `token`.
pub fn quote_for_token<L: RecordLookup + ?Sized>(
    lookup: &L,
    calculator: &PremiumCalculator,
    token: &str,
) -> Result<Quote, StoreError> {
    let record = resolve(lookup, token)?;
    Ok(calculator.quote(&record))
}

/// Seals the record under `token` for `recipient`.
pub fn seal_for_token<L: RecordLookup + ?Sized>(
    lookup: &L,
    token: &str,
    recipient: &RecipientPublicKey,
) -> Result<Envelope, StoreError> {
    let record = resolve(lookup, token)?;
    let envelope = cartag_core::seal(&record, recipient)?;
    info!(token, bytes = envelope.as_bytes().len(), "sealed record");
    Ok(envelope)
}
