//! Digest command implementation.

use super::load_store;
use cartag_store::digest_for_token;
use serde_json::json;

pub fn run(
    records: Option<String>,
    token: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(records)?;
    let digest = digest_for_token(&store, &token)?;

    if json_output {
        let out = json!({ "nft_token": token, "digest": digest });
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", digest);
    }
    Ok(())
}
