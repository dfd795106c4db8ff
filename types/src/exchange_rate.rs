//! Exchange-rate tuples and their textual wire format.
//!
//! A vote payload is a `|`-separated list of `(pair,rate)` entries, for example
//! `(BTC:USD,61000.5)|(ETH:USD,3100)`. A rate of zero or below is an abstention.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::dec::Dec;
use crate::error::TypesError;
use crate::pair::Pair;

const TUPLES_SEPARATOR: char = '|';
const FIELD_SEPARATOR: char = ',';

/// One pair's reported rate within a vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateTuple {
    pub pair: Pair,
    pub exchange_rate: Dec,
}

impl ExchangeRateTuple {
    pub fn new(pair: Pair, exchange_rate: Dec) -> Self {
        Self {
            pair,
            exchange_rate,
        }
    }
}

impl fmt::Display for ExchangeRateTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{}{})", self.pair, FIELD_SEPARATOR, self.exchange_rate)
    }
}

impl FromStr for ExchangeRateTuple {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |why: &str| TypesError::MalformedTuples(format!("{s:?}: {why}"));
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| malformed("expected (pair,rate)"))?;
        let mut fields = inner.split(FIELD_SEPARATOR);
        let (pair, rate) = match (fields.next(), fields.next(), fields.next()) {
            (Some(pair), Some(rate), None) => (pair, rate),
            _ => return Err(malformed("expected exactly two fields")),
        };
        let pair: Pair = pair.parse()?;
        let exchange_rate: Dec = rate.parse()?;
        Ok(Self::new(pair, exchange_rate))
    }
}

/// Parse a vote payload. An empty (or blank) string yields an empty list; a pair that
/// appears twice is rejected.
pub fn parse_exchange_rate_tuples(s: &str) -> Result<Vec<ExchangeRateTuple>, TypesError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let mut seen = BTreeSet::new();
    let mut tuples = Vec::new();
    for (index, part) in s.split(TUPLES_SEPARATOR).enumerate() {
        let tuple: ExchangeRateTuple = part.parse()?;
        if !seen.insert(tuple.pair.clone()) {
            return Err(TypesError::DuplicatePair {
                pair: tuple.pair.to_string(),
                index,
            });
        }
        tuples.push(tuple);
    }
    Ok(tuples)
}

/// Inverse of [`parse_exchange_rate_tuples`].
pub fn exchange_rate_tuples_to_string(tuples: &[ExchangeRateTuple]) -> String {
    tuples
        .iter()
        .map(ExchangeRateTuple::to_string)
        .collect::<Vec<_>>()
        .join(&TUPLES_SEPARATOR.to_string())
}
