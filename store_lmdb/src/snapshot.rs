//! LMDB implementation of PriceSnapshotStore.
//!
//! Keys are `pair ++ 0x00 ++ timestamp_be`, so one pair's snapshots are contiguous
//! and ordered by time. Pair strings never contain a zero byte.

use augury_store::{PriceSnapshot, PriceSnapshotStore, StoreError};
use augury_types::Pair;

use crate::store::{decode, decode_u64, encode, LmdbOracleStore};

fn pair_prefix(pair: &Pair) -> Vec<u8> {
    let mut prefix = pair.as_str().as_bytes().to_vec();
    prefix.push(0);
    prefix
}

fn snapshot_key(pair: &Pair, timestamp_ms: u64) -> Vec<u8> {
    let mut key = pair_prefix(pair);
    key.extend_from_slice(&timestamp_ms.to_be_bytes());
    key
}

fn key_timestamp(key: &[u8]) -> Result<u64, crate::LmdbError> {
    decode_u64(&key[key.len().saturating_sub(8)..])
}

impl PriceSnapshotStore for LmdbOracleStore {
    fn put_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), StoreError> {
        self.put_raw(
            self.dbs.snapshots,
            &snapshot_key(&snapshot.pair, snapshot.timestamp_ms),
            &encode(snapshot)?,
        )?;
        Ok(())
    }

    fn price_snapshots(
        &self,
        pair: &Pair,
        start_ms: u64,
        end_ms: u64,
    ) -> Result<Vec<PriceSnapshot>, StoreError> {
        let mut results = Vec::new();
        for (key, value) in self.prefixed_entries(self.dbs.snapshots, &pair_prefix(pair))? {
            let ts = key_timestamp(&key)?;
            if ts < start_ms {
                continue;
            }
            if ts > end_ms {
                break;
            }
            results.push(decode(&value)?);
        }
        Ok(results)
    }

    fn prune_price_snapshots(&self, before_ms: u64) -> Result<usize, StoreError> {
        let mut stale = Vec::new();
        for (key, _) in self.entries(self.dbs.snapshots)? {
            if key_timestamp(&key)? < before_ms {
                stale.push(key);
            }
        }
        if stale.is_empty() {
            return Ok(0);
        }
        let mut wtxn = self.env.write_txn().map_err(crate::LmdbError::from)?;
        for key in &stale {
            self.dbs
                .snapshots
                .delete(&mut wtxn, key)
                .map_err(crate::LmdbError::from)?;
        }
        wtxn.commit().map_err(crate::LmdbError::from)?;
        tracing::debug!(pruned = stale.len(), "pruned price snapshots");
        Ok(stale.len())
    }
}
