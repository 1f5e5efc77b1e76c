//! Recipient key handles for sealed envelopes.
//!
//! Public keys are exchanged as SPKI PEM (`BEGIN PUBLIC KEY`), private keys
//! as PKCS#8 PEM (`BEGIN PRIVATE KEY`). In production the public key comes
//! from the counterparty; [`RecipientPrivateKey::generate`] exists for demos
//! and tests.

use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use std::fmt;

use crate::errors::CoreError;

/// Smallest modulus accepted when generating keys.
pub const MIN_KEY_BITS: usize = 2048;

/// Public half of a recipient key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct RecipientPublicKey(RsaPublicKey);

impl RecipientPublicKey {
    /// Decodes an SPKI PEM public key.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        RsaPublicKey::from_public_key_pem(pem)
            .map(Self)
            .map_err(|e| CoreError::Key(format!("invalid public key: {}", e)))
    }

    /// SPKI PEM encoding.
    pub fn to_pem(&self) -> Result<String, CoreError> {
        self.0
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CoreError::Key(e.to_string()))
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    /// Modulus size in bytes.
    pub fn size(&self) -> usize {
        self.0.size()
    }

    pub(crate) fn inner(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl fmt::Debug for RecipientPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipientPublicKey")
            .field("bits", &self.bits())
            .finish()
    }
}

/// Private half of a recipient key pair.
#[derive(Clone)]
pub struct RecipientPrivateKey(RsaPrivateKey);

impl RecipientPrivateKey {
    /// Decodes a PKCS#8 PEM private key.
    pub fn from_pem(pem: &str) -> Result<Self, CoreError> {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .map(Self)
            .map_err(|e| CoreError::Key(format!("invalid private key: {}", e)))
    }

    /// Generates a fresh key pair. Demo and test fixture only.
    pub fn generate(bits: usize) -> Result<Self, CoreError> {
        if bits < MIN_KEY_BITS {
            return Err(CoreError::Key(format!(
                "refusing to generate a {}-bit key; minimum is {}",
                bits, MIN_KEY_BITS
            )));
        }
        RsaPrivateKey::new(&mut OsRng, bits)
            .map(Self)
            .map_err(|e| CoreError::Key(e.to_string()))
    }

    /// PKCS#8 PEM encoding.
    pub fn to_pem(&self) -> Result<String, CoreError> {
        self.0
            .to_pkcs8_pem(LineEnding::LF)
            .map(|pem| pem.as_str().to_owned())
            .map_err(|e| CoreError::Key(e.to_string()))
    }

    /// Matching public key.
    pub fn public_key(&self) -> RecipientPublicKey {
        RecipientPublicKey(RsaPublicKey::from(&self.0))
    }

    pub(crate) fn inner(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl fmt::Debug for RecipientPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipientPrivateKey")
            .field("bits", &(self.0.size() * 8))
            .finish_non_exhaustive()
    }
}
