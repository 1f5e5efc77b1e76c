//! Record digests for integrity verification.

use cartag_canonical::{compute_digest, verify_digest, Digest};

use crate::errors::CoreError;
use crate::record::Record;

/// SHA-256 over the record's canonical bytes.
///
/// # Example
///
/// ```rust
/// use cartag_core::{digest, Record};
///
/// let record = Record::builder("NFT123456789").location("CA").build()?;
/// assert_eq!(digest(&record)?, digest(&record.clone())?);
/// assert_eq!(digest(&record)?.to_hex().len(), 64);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn digest(record: &Record) -> Result<Digest, CoreError> {
    Ok(compute_digest(record)?)
}

/// Recomputes the digest of `record` and compares it with a previously
/// published value.
pub fn verify(record: &Record, claimed: &Digest) -> Result<bool, CoreError> {
    Ok(verify_digest(record, claimed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Record {
        Record::builder("NFT123456789")
            .owner_name("John Doe")
            .owner_address("1234 Elm Street, Some City, CA")
            .vehicle_id("1HGCM82633A004352")
            .vehicle_model("Honda Accord")
            .location("CA")
            .years_licensed(2)
            .violations(1)
            .accident_count(1)
            .vehicle_type("sedan")
            .build()
            .unwrap()
    }

    #[test]
    fn matches_golden_sample_digest() {
        assert_eq!(
            digest(&record()).unwrap().to_hex(),
            "436f00dc6192dc3765769071adad436ce769376782c2ae4d052fc5f99bf80f14"
        );
    }

    #[test]
    fn every_field_change_moves_the_digest() {
        let base = record();
        let baseline = digest(&base).unwrap();
        let b = || base.to_builder();
        let variants = vec![
            b().owner_name("John Q. Doe").build().unwrap(),
            b().owner_address("1235 Elm Street, Some City, CA").build().unwrap(),
            b().vehicle_id("1HGCM82633A004353").build().unwrap(),
            b().vehicle_model("Honda Civic").build().unwrap(),
            b().location("NV").build().unwrap(),
            b().years_licensed(3).build().unwrap(),
            b().violations(2).build().unwrap(),
            b().claims(1).build().unwrap(),
            b().accident_count(2).build().unwrap(),
            b().vehicle_type("van").build().unwrap(),
            b().history_entry("mileage", json!(1)).unwrap().build().unwrap(),
            Record::from_json(&{
                let mut v = base.to_json();
                v["nft_token"] = json!("NFT123456780");
                v
            })
            .unwrap(),
        ];
        for variant in variants {
            assert_ne!(digest(&variant).unwrap(), baseline, "{:?}", variant);
        }
    }

    #[test]
    fn verify_accepts_only_the_published_digest() {
        let r = record();
        let published = digest(&r).unwrap();
        assert!(verify(&r, &published).unwrap());
        let altered = r.to_builder().claims(4).build().unwrap();
        assert!(!verify(&altered, &published).unwrap());
    }
}
