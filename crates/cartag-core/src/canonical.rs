//! Canonical byte encoding of records.
//!
//! The digest and the sealed envelope are both computed over these bytes,
//! so `serialize` must return identical output for equal records on every
//! platform.

use cartag_canonical::to_canonical_bytes;

use crate::errors::CoreError;
use crate::record::Record;

/// Canonical UTF-8 bytes of a record.
pub fn serialize(record: &Record) -> Result<Vec<u8>, CoreError> {
    Ok(to_canonical_bytes(record)?)
}

/// Parses canonical bytes back into a record.
///
/// Input that is valid JSON but not in canonical form (reordered keys,
/// whitespace) is rejected, as is anything that does not describe a valid
/// record.
pub fn parse(bytes: &[u8]) -> Result<Record, CoreError> {
    let record: Record = serde_json::from_slice(bytes)
        .map_err(|e| CoreError::Serialization(format!("not a valid record: {}", e)))?;
    if serialize(&record)? != bytes {
        return Err(CoreError::Serialization(
            "bytes are not in canonical form".to_string(),
        ));
    }
    Ok(record)
}
