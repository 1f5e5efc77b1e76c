//! Keygen command implementation.

use cartag_core::RecipientPrivateKey;
use std::path::Path;
use tracing::info;

pub fn run(out_dir: String, bits: usize) -> Result<(), Box<dyn std::error::Error>> {
    let dir = Path::new(&out_dir);
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create directory {}: {}", out_dir, e))?;

    let private = RecipientPrivateKey::generate(bits)?;
    let private_path = dir.join("recipient.pem");
    let public_path = dir.join("recipient.pub.pem");
    std::fs::write(&private_path, private.to_pem()?)?;
    std::fs::write(&public_path, private.public_key().to_pem()?)?;

    info!(bits, dir = %dir.display(), "generated recipient key pair");
    println!("{}", private_path.display());
    println!("{}", public_path.display());
    Ok(())
}
