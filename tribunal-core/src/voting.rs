//! Commit-reveal vote commitments
//!
//! A juror first submits the hash of their vote and a private salt, then
//! discloses both once the commit window closes. Copying another juror's
//! visible commitment reveals nothing about the vote inside it.

use crate::case::Vote;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Caller-supplied commitment salt; must be single-use
pub type Salt = [u8; 32];

/// A 32-byte vote commitment
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Wrap raw commitment bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes of the commitment
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let stripped = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(stripped).map_err(de::Error::custom)?;
        let raw: [u8; 32] = bytes
            .try_into()
            .map_err(|_| de::Error::custom("commitment must be 32 bytes"))?;
        Ok(Self(raw))
    }
}

/// Commitment hash over the fixed-width `vote byte ‖ salt` encoding
pub fn commitment_hash(vote: Vote, salt: &Salt) -> Commitment {
    let mut hasher = Keccak256::new();
    hasher.update([vote.as_byte()]);
    hasher.update(salt);
    Commitment(hasher.finalize().into())
}

/// A juror's vote and salt, held privately until reveal
///
/// The salt is wiped from memory when the value is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct VoteSecret {
    #[zeroize(skip)]
    vote: Vote,
    salt: Salt,
}

impl VoteSecret {
    /// Bind a vote to a caller-supplied salt
    pub fn new(vote: Vote, salt: Salt) -> Self {
        Self { vote, salt }
    }

    /// The vote to disclose at reveal time
    pub fn vote(&self) -> Vote {
        self.vote
    }

    /// The salt to disclose at reveal time
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Commitment to submit during the commit window
    pub fn commitment(&self) -> Commitment {
        commitment_hash(self.vote, &self.salt)
    }
}
