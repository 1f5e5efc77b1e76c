//! Unseal command implementation.

use super::{read_bytes, read_text};
use cartag_core::{serialize, unseal, Envelope, RecipientPrivateKey};

pub fn run(
    private_key: String,
    input: Option<String>,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let recipient = RecipientPrivateKey::from_pem(&read_text(&private_key)?)?;
    let bytes = read_bytes(input)?;

    let envelope = if raw {
        Envelope::from_bytes(bytes)
    } else {
        let text = String::from_utf8(bytes).map_err(|_| "Envelope is not base64 text")?;
        Envelope::from_base64(text.trim())?
    };

    let record = unseal(envelope, &recipient)?;
    println!("{}", String::from_utf8_lossy(&serialize(&record)?));
    Ok(())
}
