//! Abstract storage traits for the Augury price oracle.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these traits. The
//! oracle engine depends only on the traits. Each collection is a separate trait so a
//! backend can be assembled piecewise; [`OracleStore`] bundles them all.
//!
//! Iterating methods return their entries sorted by key (address bytes, pair string,
//! or pool id) so callers observe the same order on every node.

pub mod delegation;
pub mod error;
pub mod exchange_rate;
pub mod miss_counter;
pub mod params;
pub mod prevote;
pub mod reward;
pub mod snapshot;
pub mod vote;
pub mod whitelist;

pub use delegation::FeederDelegationStore;
pub use error::StoreError;
pub use exchange_rate::{DatedPrice, ExchangeRateStore};
pub use miss_counter::MissCounterStore;
pub use params::ParamsStore;
pub use prevote::{AggregateExchangeRatePrevote, PrevoteStore};
pub use reward::{RewardPool, RewardStore};
pub use snapshot::{PriceSnapshot, PriceSnapshotStore};
pub use vote::{AggregateExchangeRateVote, VoteStore};
pub use whitelist::WhitelistStore;

/// Every collection the oracle engine reads or writes.
pub trait OracleStore:
    ParamsStore
    + ExchangeRateStore
    + PriceSnapshotStore
    + PrevoteStore
    + VoteStore
    + FeederDelegationStore
    + MissCounterStore
    + WhitelistStore
    + RewardStore
{
}

impl<T> OracleStore for T where
    T: ParamsStore
        + ExchangeRateStore
        + PriceSnapshotStore
        + PrevoteStore
        + VoteStore
        + FeederDelegationStore
        + MissCounterStore
        + WhitelistStore
        + RewardStore
{
}
