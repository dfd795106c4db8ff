//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while constructing or parsing the fundamental types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid decimal {0:?}")]
    InvalidDec(String),

    #[error("decimal out of range: {0}")]
    DecOverflow(String),

    #[error("invalid asset pair {0:?}")]
    InvalidPair(String),

    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("invalid vote hash: {0}")]
    InvalidHash(String),

    #[error("malformed exchange rate tuples: {0}")]
    MalformedTuples(String),

    #[error("duplicate pair {pair} at index {index}")]
    DuplicatePair { pair: String, index: usize },

    #[error("invalid params: {0}")]
    InvalidParams(String),
}
