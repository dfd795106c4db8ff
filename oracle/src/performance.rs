//! Per-period validator outcome accounting.
//!
//! A [`ValidatorPerformances`] map is built fresh at the start of each period's
//! processing and dropped once rewards, misses and events have been derived from it.

use augury_types::ValAddress;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorPerformance {
    /// Consensus power at the start of the period.
    pub power: u64,
    /// Sum of power over the pairs this validator won.
    pub reward_weight: u64,
    pub win_count: u64,
    pub abstain_count: u64,
    pub miss_count: u64,
    pub val_address: ValAddress,
}

impl ValidatorPerformance {
    pub fn new(power: u64, val_address: ValAddress) -> Self {
        Self {
            power,
            reward_weight: 0,
            win_count: 0,
            abstain_count: 0,
            miss_count: 0,
            val_address,
        }
    }

    fn outcomes(&self) -> u64 {
        self.win_count
            .saturating_add(self.abstain_count)
            .saturating_add(self.miss_count)
    }
}

/// Performances keyed by operator address, iterated in address order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorPerformances(BTreeMap<ValAddress, ValidatorPerformance>);

impl ValidatorPerformances {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, performance: ValidatorPerformance) {
        self.0.insert(performance.val_address, performance);
    }

    pub fn get(&self, validator: &ValAddress) -> Option<&ValidatorPerformance> {
        self.0.get(validator)
    }

    pub fn get_mut(&mut self, validator: &ValAddress) -> Option<&mut ValidatorPerformance> {
        self.0.get_mut(validator)
    }

    pub fn contains(&self, validator: &ValAddress) -> bool {
        self.0.contains_key(validator)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> btree_map::Values<'_, ValAddress, ValidatorPerformance> {
        self.0.values()
    }

    /// Sum of every validator's reward weight.
    pub fn total_reward_weight(&self) -> u64 {
        self.0
            .values()
            .fold(0u64, |acc, p| acc.saturating_add(p.reward_weight))
    }

    /// Count every pair a validator neither won, missed nor explicitly abstained on
    /// as an abstention.
    pub fn increment_abstains_by_omission(&mut self, num_pairs: u64) {
        for performance in self.0.values_mut() {
            let omitted = num_pairs.saturating_sub(performance.outcomes());
            performance.abstain_count = performance.abstain_count.saturating_add(omitted);
        }
    }
}

impl fmt::Display for ValidatorPerformances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0.values().collect::<Vec<_>>())
            .map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(id: u8) -> ValAddress {
        ValAddress::new([id; 20])
    }

    #[test]
    fn iterates_in_address_order() {
        let mut perfs = ValidatorPerformances::new();
        perfs.insert(ValidatorPerformance::new(1, addr(3)));
        perfs.insert(ValidatorPerformance::new(1, addr(1)));
        perfs.insert(ValidatorPerformance::new(1, addr(2)));
        let order: Vec<u8> = perfs.values().map(|p| p.val_address.as_bytes()[0]).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn omissions_become_abstains() {
        let mut perfs = ValidatorPerformances::new();
        let mut partial = ValidatorPerformance::new(10, addr(1));
        partial.win_count = 1;
        partial.miss_count = 1;
        perfs.insert(partial);
        perfs.insert(ValidatorPerformance::new(10, addr(2)));

        perfs.increment_abstains_by_omission(3);

        assert_eq!(perfs.get(&addr(1)).unwrap().abstain_count, 1);
        assert_eq!(perfs.get(&addr(1)).unwrap().miss_count, 1);
        assert_eq!(perfs.get(&addr(2)).unwrap().abstain_count, 3);
    }

    #[test]
    fn total_reward_weight_sums() {
        let mut perfs = ValidatorPerformances::new();
        let mut a = ValidatorPerformance::new(10, addr(1));
        a.reward_weight = 20;
        let mut b = ValidatorPerformance::new(10, addr(2));
        b.reward_weight = 5;
        perfs.insert(a);
        perfs.insert(b);
        assert_eq!(perfs.total_reward_weight(), 25);
    }

    #[test]
    fn display_is_json() {
        let mut perfs = ValidatorPerformances::new();
        perfs.insert(ValidatorPerformance::new(7, addr(1)));
        let text = perfs.to_string();
        assert!(text.starts_with('['));
        assert!(text.contains("\"power\":7"));
    }
}
