//! Demo records used when no record file is supplied.

use crate::error::StoreError;
use crate::memory::MemoryStore;

const SAMPLE_RECORDS: &str = r#"[
  {
    "nft_token": "NFT123456789",
    "name": "John Doe",
    "vin": "1HGCM82633A004352",
    "history": {"accident_count": 1, "vehicle_type": "sedan"},
    "location": "CA",
    "address": "1234 Elm Street, Some City, CA",
    "car_model": "Honda Accord",
    "years_licensed": 2,
    "violations": 1,
    "claims": 0
  },
  {
    "nft_token": "NFT987654321",
    "name": "Jane Smith",
    "vin": "2FTRX18W1XCA12345",
    "history": {"accident_count": 0, "vehicle_type": "SUV"},
    "location": "NY",
    "address": "5678 Oak Avenue, Another City, NY",
    "car_model": "Toyota RAV4",
    "years_licensed": 5,
    "violations": 0,
    "claims": 0
  }
]"#;

/// Store holding the two demo records `NFT123456789` and `NFT987654321`.
pub fn sample_store() -> Result<MemoryStore, StoreError> {
    MemoryStore::from_json_str(SAMPLE_RECORDS)
}
