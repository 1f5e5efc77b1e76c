use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};

use std::fmt;
use std::sync::OnceLock;

use crate::validation::ValidationError;

/// Length in bytes of every supported digest.
pub const DIGEST_LEN: usize = 32;

/// Supported digest algorithms for record fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256, the only algorithm Cartag emits.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Algorithm + 256-bit digest value.
///
/// Serialized as `{"alg":"sha-256","hex":"<64 lowercase hex chars>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "DigestRepr", try_from = "DigestRepr")]
pub struct Digest {
    alg: DigestAlg,
    bytes: [u8; DIGEST_LEN],
}

#[derive(Serialize, Deserialize)]
struct DigestRepr {
    alg: DigestAlg,
    hex: String,
}

impl Digest {
    /// Hashes raw bytes with SHA-256.
    pub fn sha256(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&hash);
        Self {
            alg: DigestAlg::Sha256,
            bytes,
        }
    }

    /// Wraps already-computed digest bytes.
    pub fn from_bytes(alg: DigestAlg, bytes: [u8; DIGEST_LEN]) -> Self {
        Self { alg, bytes }
    }

    /// Parses a 64-character hex rendering. Uppercase input is accepted and
    /// normalized; anything else is rejected.
    pub fn from_hex(alg: DigestAlg, hex_str: impl Into<String>) -> Result<Self, ValidationError> {
        let hex_str = hex_str.into().to_ascii_lowercase();
        if !hex_pattern().is_match(&hex_str) {
            return Err(ValidationError::PatternMismatch {
                field: "digest",
                value: hex_str,
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(&hex_str, &mut bytes).map_err(|_| {
            ValidationError::PatternMismatch {
                field: "digest",
                value: hex_str.clone(),
            }
        })?;
        Ok(Self { alg, bytes })
    }

    /// Digest algorithm.
    pub fn alg(&self) -> DigestAlg {
        self.alg
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.bytes
    }

    /// Lowercase hex rendering (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Digest> for DigestRepr {
    fn from(digest: Digest) -> Self {
        Self {
            alg: digest.alg,
            hex: digest.to_hex(),
        }
    }
}

impl TryFrom<DigestRepr> for Digest {
    type Error = ValidationError;

    fn try_from(repr: DigestRepr) -> Result<Self, Self::Error> {
        Digest::from_hex(repr.alg, repr.hex)
    }
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex"))
}
