//! Sealed envelopes: a record's canonical bytes encrypted to a recipient.
//!
//! Scheme: RSA-OAEP with SHA-256 as both the label digest and the MGF1
//! digest, empty label. The whole canonical record must fit in one OAEP
//! block, i.e. at most `k - 66` bytes for a `k`-byte modulus (190 bytes for
//! RSA-2048, 446 for RSA-4096). Larger records need a hybrid scheme, which
//! this module does not provide.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::Oaep;
use sha2::Sha256;

use crate::canonical;
use crate::errors::CoreError;
use crate::keys::{RecipientPrivateKey, RecipientPublicKey};
use crate::record::Record;

/// Identifier of the only supported scheme.
pub const SCHEME: &str = "rsa-oaep-sha256";

/// OAEP overhead for a 32-byte hash: `2 * hLen + 2`.
const OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

/// Ciphertext of one sealed record. Carries no framing; the scheme is
/// agreed out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Wraps ciphertext received from a sender.
    pub fn from_bytes(ciphertext: Vec<u8>) -> Self {
        Self { ciphertext }
    }

    /// Decodes standard, padded base64 text.
    pub fn from_base64(text: &str) -> Result<Self, CoreError> {
        STANDARD
            .decode(text.trim())
            .map(Self::from_bytes)
            .map_err(|e| CoreError::Decryption(format!("envelope is not valid base64: {}", e)))
    }

    /// Scheme the ciphertext was produced with.
    pub fn scheme(&self) -> &'static str {
        SCHEME
    }

    /// Raw ciphertext.
    pub fn as_bytes(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Consumes the envelope, returning the ciphertext.
    pub fn into_bytes(self) -> Vec<u8> {
        self.ciphertext
    }

    /// Standard, padded base64 rendering.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.ciphertext)
    }
}

/// Largest canonical record, in bytes, that can be sealed to `key`.
pub fn max_plaintext_len(key: &RecipientPublicKey) -> usize {
    key.size().saturating_sub(OAEP_SHA256_OVERHEAD)
}

/// Encrypts the record's canonical bytes to the recipient's public key.
///
/// Padding is randomized, so sealing the same record twice yields different
/// ciphertexts that both open to the same record.
pub fn seal(record: &Record, recipient: &RecipientPublicKey) -> Result<Envelope, CoreError> {
    let plaintext = canonical::serialize(record)?;
    let max = max_plaintext_len(recipient);
    if plaintext.len() > max {
        return Err(CoreError::PayloadTooLarge {
            size: plaintext.len(),
            max,
        });
    }
    let ciphertext = recipient
        .inner()
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &plaintext)
        .map_err(|e| CoreError::Key(format!("encryption failed: {}", e)))?;
    Ok(Envelope { ciphertext })
}

/// Decrypts an envelope and parses the canonical record it carries.
pub fn unseal(envelope: Envelope, recipient: &RecipientPrivateKey) -> Result<Record, CoreError> {
    let plaintext = recipient
        .inner()
        .decrypt(Oaep::new::<Sha256>(), &envelope.ciphertext)
        .map_err(|e| CoreError::Decryption(e.to_string()))?;
    canonical::parse(&plaintext)
}
