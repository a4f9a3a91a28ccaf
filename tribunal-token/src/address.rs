//! Account addresses shared by the ledger and the dispute core

use crate::TokenError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length of an account address in bytes
pub const ADDRESS_LEN: usize = 20;

/// A fixed-width account address
///
/// Serializes as a `0x`-prefixed hex string so maps keyed by address stay
/// well-formed in JSON.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Create an address from raw bytes
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes of the address
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Parse a `0x`-prefixed hex string
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| TokenError::InvalidAddress(format!("{s}: {e}")))?;
        if bytes.len() != ADDRESS_LEN {
            return Err(TokenError::InvalidAddress(format!(
                "{s}: expected {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let mut raw = [0u8; ADDRESS_LEN];
        raw.copy_from_slice(&bytes);
        Ok(Self(raw))
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}
