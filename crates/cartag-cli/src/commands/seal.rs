//! Seal command implementation.

use super::{load_store, read_text};
use cartag_core::RecipientPublicKey;
use cartag_store::seal_for_token;

pub fn run(
    records: Option<String>,
    token: String,
    public_key: String,
    out: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let recipient = RecipientPublicKey::from_pem(&read_text(&public_key)?)?;
    let store = load_store(records)?;
    let envelope = seal_for_token(&store, &token, &recipient)?;

    match out {
        Some(path) => std::fs::write(&path, envelope.as_bytes())
            .map_err(|e| format!("Failed to write {}: {}", path, e))?,
        None => println!("{}", envelope.to_base64()),
    }
    Ok(())
}
