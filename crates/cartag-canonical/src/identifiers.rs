use serde::{Deserialize, Serialize};

use std::borrow::Borrow;
use std::fmt;

use crate::validation::ValidationError;

/// Opaque NFT token addressing a vehicle record.
///
/// The token is never interpreted; the only rule is that it carries at least
/// one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NftToken(String);

impl NftToken {
    /// Parses a token, rejecting empty or blank strings.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "nft_token" });
        }
        Ok(Self(s))
    }

    /// Borrowed string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NftToken {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<NftToken> for String {
    fn from(token: NftToken) -> Self {
        token.0
    }
}

impl AsRef<str> for NftToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NftToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NftToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
