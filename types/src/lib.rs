//! Fundamental types for the Augury price oracle.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, asset pairs, fixed-point decimals, coins, oracle parameters, the
//! exchange-rate tuple codec, and the commit-reveal vote hash.

pub mod address;
pub mod coins;
pub mod dec;
pub mod error;
pub mod exchange_rate;
pub mod hash;
pub mod pair;
pub mod params;

pub use address::{AccAddress, ConsAddress, ValAddress};
pub use coins::{Coin, Coins};
pub use dec::Dec;
pub use error::TypesError;
pub use exchange_rate::{
    exchange_rate_tuples_to_string, parse_exchange_rate_tuples, ExchangeRateTuple,
};
pub use hash::AggregateVoteHash;
pub use pair::Pair;
pub use params::{Params, ParamsUpdate};
