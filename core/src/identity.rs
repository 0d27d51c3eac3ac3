//! Identities of escrow participants, asset mints, and derived accounts.

use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_with::hex::Hex;
use serde_with::serde_as;

use crate::error::IdentityError;

/// A 32-byte identifier for any account-like entity: a party's
/// public identity, an asset mint, or a derived escrow address.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ID(#[serde_as(as = "Hex")] [u8; 32]);

impl ID {
    /// Wraps raw identifier bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for ID {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ID {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl FromStr for ID {
    type Err = IdentityError;

    /// Parses an identifier from hex (with `0x` prefix), base58, or base64.
    ///
    /// # Errors
    ///
    /// Returns an `IdentityError` if the string is empty, decodes to a
    /// length other than 32 bytes, or matches no supported encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdentityError::EmptyIdentity);
        }

        if let Some(hex_str) = s.strip_prefix("0x") {
            let bytes = hex::decode(hex_str)?;
            return Self::try_from_slice(&bytes);
        }

        if let Ok(bytes) = bs58::decode(s).into_vec() {
            return Self::try_from_slice(&bytes);
        }
        if let Ok(bytes) = BASE64.decode(s) {
            return Self::try_from_slice(&bytes);
        }

        Err(IdentityError::UnsupportedFormat)
    }
}

impl ID {
    fn try_from_slice(bytes: &[u8]) -> Result<Self, IdentityError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }
}
