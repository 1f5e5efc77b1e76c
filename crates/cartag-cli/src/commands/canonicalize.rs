//! Canonicalize command implementation.

use super::load_store;
use cartag_store::canonical_for_token;

pub fn run(records: Option<String>, token: String) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(records)?;
    let bytes = canonical_for_token(&store, &token)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
