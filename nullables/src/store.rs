//! Nullable store: thread-safe in-memory storage for testing.

use augury_store::{
    AggregateExchangeRatePrevote, AggregateExchangeRateVote, DatedPrice, ExchangeRateStore,
    FeederDelegationStore, MissCounterStore, ParamsStore, PrevoteStore, PriceSnapshot,
    PriceSnapshotStore, RewardPool, RewardStore, StoreError, VoteStore, WhitelistStore,
};
use augury_types::{AccAddress, Pair, Params, ValAddress};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

/// An in-memory implementation of every oracle store trait.
///
/// `BTreeMap`s keep iteration in key order, matching the LMDB backend.
#[derive(Default)]
pub struct NullOracleStore {
    params: Mutex<Option<Params>>,
    exchange_rates: Mutex<BTreeMap<Pair, DatedPrice>>,
    snapshots: Mutex<BTreeMap<(Pair, u64), PriceSnapshot>>,
    prevotes: Mutex<BTreeMap<ValAddress, AggregateExchangeRatePrevote>>,
    votes: Mutex<BTreeMap<ValAddress, AggregateExchangeRateVote>>,
    delegations: Mutex<BTreeMap<ValAddress, AccAddress>>,
    miss_counters: Mutex<BTreeMap<ValAddress, u64>>,
    whitelist: Mutex<BTreeSet<Pair>>,
    reward_pools: Mutex<BTreeMap<u64, RewardPool>>,
    next_reward_id: Mutex<u64>,
}

impl NullOracleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParamsStore for NullOracleStore {
    fn get_params(&self) -> Result<Params, StoreError> {
        self.params
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| StoreError::NotFound("params".into()))
    }

    fn put_params(&self, params: &Params) -> Result<(), StoreError> {
        *self.params.lock().unwrap() = Some(params.clone());
        Ok(())
    }
}

impl ExchangeRateStore for NullOracleStore {
    fn get_exchange_rate(&self, pair: &Pair) -> Result<Option<DatedPrice>, StoreError> {
        Ok(self.exchange_rates.lock().unwrap().get(pair).cloned())
    }

    fn put_exchange_rate(&self, pair: &Pair, price: &DatedPrice) -> Result<(), StoreError> {
        self.exchange_rates
            .lock()
            .unwrap()
            .insert(pair.clone(), price.clone());
        Ok(())
    }

    fn delete_exchange_rate(&self, pair: &Pair) -> Result<(), StoreError> {
        self.exchange_rates.lock().unwrap().remove(pair);
        Ok(())
    }

    fn iter_exchange_rates(&self) -> Result<Vec<(Pair, DatedPrice)>, StoreError> {
        Ok(self
            .exchange_rates
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl PriceSnapshotStore for NullOracleStore {
    fn put_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), StoreError> {
        self.snapshots.lock().unwrap().insert(
            (snapshot.pair.clone(), snapshot.timestamp_ms),
            snapshot.clone(),
        );
        Ok(())
    }

    fn price_snapshots(
        &self,
        pair: &Pair,
        start_ms: u64,
        end_ms: u64,
    ) -> Result<Vec<PriceSnapshot>, StoreError> {
        if start_ms > end_ms {
            return Ok(Vec::new());
        }
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .range((pair.clone(), start_ms)..=(pair.clone(), end_ms))
            .map(|(_, v)| v.clone())
            .collect())
    }

    fn prune_price_snapshots(&self, before_ms: u64) -> Result<usize, StoreError> {
        let mut snapshots = self.snapshots.lock().unwrap();
        let before = snapshots.len();
        snapshots.retain(|(_, ts), _| *ts >= before_ms);
        Ok(before - snapshots.len())
    }
}

impl PrevoteStore for NullOracleStore {
    fn get_prevote(
        &self,
        voter: &ValAddress,
    ) -> Result<Option<AggregateExchangeRatePrevote>, StoreError> {
        Ok(self.prevotes.lock().unwrap().get(voter).cloned())
    }

    fn put_prevote(&self, prevote: &AggregateExchangeRatePrevote) -> Result<(), StoreError> {
        self.prevotes
            .lock()
            .unwrap()
            .insert(prevote.voter, prevote.clone());
        Ok(())
    }

    fn delete_prevote(&self, voter: &ValAddress) -> Result<(), StoreError> {
        self.prevotes.lock().unwrap().remove(voter);
        Ok(())
    }

    fn iter_prevotes(&self) -> Result<Vec<AggregateExchangeRatePrevote>, StoreError> {
        Ok(self.prevotes.lock().unwrap().values().cloned().collect())
    }
}

impl VoteStore for NullOracleStore {
    fn get_vote(
        &self,
        voter: &ValAddress,
    ) -> Result<Option<AggregateExchangeRateVote>, StoreError> {
        Ok(self.votes.lock().unwrap().get(voter).cloned())
    }

    fn put_vote(&self, vote: &AggregateExchangeRateVote) -> Result<(), StoreError> {
        self.votes.lock().unwrap().insert(vote.voter, vote.clone());
        Ok(())
    }

    fn delete_vote(&self, voter: &ValAddress) -> Result<(), StoreError> {
        self.votes.lock().unwrap().remove(voter);
        Ok(())
    }

    fn iter_votes(&self) -> Result<Vec<AggregateExchangeRateVote>, StoreError> {
        Ok(self.votes.lock().unwrap().values().cloned().collect())
    }
}

impl FeederDelegationStore for NullOracleStore {
    fn get_feeder_delegation(
        &self,
        validator: &ValAddress,
    ) -> Result<Option<AccAddress>, StoreError> {
        Ok(self.delegations.lock().unwrap().get(validator).copied())
    }

    fn put_feeder_delegation(
        &self,
        validator: &ValAddress,
        feeder: &AccAddress,
    ) -> Result<(), StoreError> {
        self.delegations.lock().unwrap().insert(*validator, *feeder);
        Ok(())
    }

    fn iter_feeder_delegations(&self) -> Result<Vec<(ValAddress, AccAddress)>, StoreError> {
        Ok(self
            .delegations
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect())
    }
}

impl MissCounterStore for NullOracleStore {
    fn get_miss_counter(&self, validator: &ValAddress) -> Result<Option<u64>, StoreError> {
        Ok(self.miss_counters.lock().unwrap().get(validator).copied())
    }

    fn put_miss_counter(&self, validator: &ValAddress, count: u64) -> Result<(), StoreError> {
        self.miss_counters.lock().unwrap().insert(*validator, count);
        Ok(())
    }

    fn delete_miss_counter(&self, validator: &ValAddress) -> Result<(), StoreError> {
        self.miss_counters.lock().unwrap().remove(validator);
        Ok(())
    }

    fn iter_miss_counters(&self) -> Result<Vec<(ValAddress, u64)>, StoreError> {
        Ok(self
            .miss_counters
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect())
    }
}

impl WhitelistStore for NullOracleStore {
    fn is_whitelisted(&self, pair: &Pair) -> Result<bool, StoreError> {
        Ok(self.whitelist.lock().unwrap().contains(pair))
    }

    fn insert_whitelisted_pair(&self, pair: &Pair) -> Result<(), StoreError> {
        self.whitelist.lock().unwrap().insert(pair.clone());
        Ok(())
    }

    fn delete_whitelisted_pair(&self, pair: &Pair) -> Result<(), StoreError> {
        self.whitelist.lock().unwrap().remove(pair);
        Ok(())
    }

    fn iter_whitelisted_pairs(&self) -> Result<Vec<Pair>, StoreError> {
        Ok(self.whitelist.lock().unwrap().iter().cloned().collect())
    }
}

impl RewardStore for NullOracleStore {
    fn next_reward_id(&self) -> Result<u64, StoreError> {
        let mut next = self.next_reward_id.lock().unwrap();
        let id = *next;
        *next += 1;
        Ok(id)
    }

    fn get_reward_pool(&self, id: u64) -> Result<Option<RewardPool>, StoreError> {
        Ok(self.reward_pools.lock().unwrap().get(&id).cloned())
    }

    fn put_reward_pool(&self, pool: &RewardPool) -> Result<(), StoreError> {
        self.reward_pools
            .lock()
            .unwrap()
            .insert(pool.id, pool.clone());
        Ok(())
    }

    fn delete_reward_pool(&self, id: u64) -> Result<(), StoreError> {
        self.reward_pools.lock().unwrap().remove(&id);
        Ok(())
    }

    fn iter_reward_pools(&self) -> Result<Vec<RewardPool>, StoreError> {
        Ok(self.reward_pools.lock().unwrap().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augury_types::Dec;

    fn pair(s: &str) -> Pair {
        s.parse().unwrap()
    }

    #[test]
    fn missing_params_is_not_found() {
        let store = NullOracleStore::new();
        assert!(matches!(store.get_params(), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn snapshot_range_is_per_pair_and_inclusive() {
        let store = NullOracleStore::new();
        for (p, ts) in [("BTC:USD", 10), ("BTC:USD", 20), ("ETH:USD", 15), ("BTC:USD", 30)] {
            store
                .put_price_snapshot(&PriceSnapshot {
                    pair: pair(p),
                    price: Dec::ONE,
                    timestamp_ms: ts,
                })
                .unwrap();
        }
        let got: Vec<u64> = store
            .price_snapshots(&pair("BTC:USD"), 10, 20)
            .unwrap()
            .iter()
            .map(|s| s.timestamp_ms)
            .collect();
        assert_eq!(got, vec![10, 20]);
        assert_eq!(store.prune_price_snapshots(20).unwrap(), 2);
        assert_eq!(store.price_snapshots(&pair("BTC:USD"), 0, 100).unwrap().len(), 2);
    }

    #[test]
    fn reward_ids_increase() {
        let store = NullOracleStore::new();
        assert_eq!(store.next_reward_id().unwrap(), 0);
        assert_eq!(store.next_reward_id().unwrap(), 1);
    }
}
