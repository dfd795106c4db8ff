//! Commit hash for the prevote phase.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::address::ValAddress;
use crate::error::TypesError;

/// Length in bytes of a commit hash (SHA-256 truncated).
pub const HASH_LEN: usize = 20;

/// `SHA-256("{salt}:{rates}:{validator}")[..20]`, committed in a prevote and
/// checked against the revealed vote.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AggregateVoteHash([u8; HASH_LEN]);

impl AggregateVoteHash {
    pub fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Hash the reveal exactly as submitted; `rates` is the raw tuple string.
    pub fn compute(salt: &str, rates: &str, validator: &ValAddress) -> Self {
        let digest = Sha256::digest(format!("{salt}:{rates}:{validator}").as_bytes());
        let mut bytes = [0u8; HASH_LEN];
        bytes.copy_from_slice(&digest[..HASH_LEN]);
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let bytes = hex::decode(s).map_err(|e| TypesError::InvalidHash(e.to_string()))?;
        let arr: [u8; HASH_LEN] = bytes.as_slice().try_into().map_err(|_| {
            TypesError::InvalidHash(format!("expected {HASH_LEN} bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for AggregateVoteHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for AggregateVoteHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AggregateVoteHash({})", hex::encode(&self.0[..4]))
    }
}

impl Serialize for AggregateVoteHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AggregateVoteHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
