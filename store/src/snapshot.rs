use augury_types::{Dec, Pair};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A historical price point, kept for time-weighted averages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub pair: Pair,
    pub price: Dec,
    pub timestamp_ms: u64,
}

/// Snapshots keyed by `(pair, timestamp)`. A second snapshot for the same pair and
/// timestamp replaces the first.
pub trait PriceSnapshotStore {
    fn put_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), StoreError>;

    /// Snapshots of `pair` with `start_ms <= timestamp <= end_ms`, oldest first.
    fn price_snapshots(
        &self,
        pair: &Pair,
        start_ms: u64,
        end_ms: u64,
    ) -> Result<Vec<PriceSnapshot>, StoreError>;

    /// Delete every snapshot older than `before_ms`. Returns how many were removed.
    fn prune_price_snapshots(&self, before_ms: u64) -> Result<usize, StoreError>;
}
