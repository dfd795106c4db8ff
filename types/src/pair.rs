//! Asset pair identifiers of the form `base:quote`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Separator between the base and quote denominations.
pub const PAIR_SEPARATOR: char = ':';

/// An asset pair such as `BTC:USD`.
///
/// Pairs are case-sensitive and compare by their canonical string, which gives the
/// deterministic order used when iterating ballots and the whitelist.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair(String);

impl Pair {
    /// Build a pair from its two denominations.
    pub fn new(base: &str, quote: &str) -> Result<Self, TypesError> {
        format!("{base}{PAIR_SEPARATOR}{quote}").parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn base(&self) -> &str {
        self.split().0
    }

    pub fn quote(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        // Validated on construction, so the separator is always present.
        self.0.split_once(PAIR_SEPARATOR).unwrap_or((&self.0, ""))
    }
}

fn valid_denom(denom: &str) -> bool {
    !denom.is_empty()
        && denom
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
}

impl FromStr for Pair {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once(PAIR_SEPARATOR)
            .ok_or_else(|| TypesError::InvalidPair(s.to_string()))?;
        if !valid_denom(base) || !valid_denom(quote) {
            return Err(TypesError::InvalidPair(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

impl Serialize for Pair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Pair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
