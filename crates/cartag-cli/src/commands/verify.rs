//! Verify command implementation.

use super::load_store;
use cartag_canonical::{Digest, DigestAlg};
use cartag_store::verify_for_token;

pub fn run(
    records: Option<String>,
    token: String,
    claimed: String,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let claimed = Digest::from_hex(DigestAlg::Sha256, claimed)
        .map_err(|e| format!("Invalid digest: {}", e))?;
    let store = load_store(records)?;

    if verify_for_token(&store, &token, &claimed)? {
        println!("MATCH {}", token);
    } else {
        println!("MISMATCH {}", token);
        if strict {
            std::process::exit(1);
        }
    }
    Ok(())
}
