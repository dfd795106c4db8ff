//! Oracle parameters, governable through the params-edit message.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::dec::Dec;
use crate::error::TypesError;
use crate::pair::Pair;

/// All oracle parameters stored on chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // ── Voting ───────────────────────────────────────────────────────────
    /// Number of blocks in one vote period. Prices are tallied on the last block.
    pub vote_period: u64,

    /// Fraction of total bonded power a pair's ballot must reach to be tallied.
    pub vote_threshold: Dec,

    /// Width of the reward band around the weighted median, as a fraction of it.
    pub reward_band: Dec,

    /// Pairs validators are expected to vote on.
    pub whitelist: Vec<Pair>,

    /// Minimum number of positive votes for a pair's ballot to be tallied.
    pub min_voters: u64,

    // ── Slashing ─────────────────────────────────────────────────────────
    /// Fraction of stake burned when a validator falls below `min_valid_per_window`.
    pub slash_fraction: Dec,

    /// Number of blocks in one slash window.
    pub slash_window: u64,

    /// Minimum fraction of vote periods in a window a validator must not miss.
    pub min_valid_per_window: Dec,

    // ── Prices ───────────────────────────────────────────────────────────
    /// Blocks after which an untouched price is purged.
    pub expiration_blocks: u64,

    /// Time window in milliseconds used for time-weighted average prices.
    pub twap_lookback_window_ms: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            vote_period: 10,
            vote_threshold: Dec::from_raw(333_333_333_333_333_333),
            reward_band: Dec::from_raw(20_000_000_000_000_000),
            whitelist: ["BTC:USD", "ETH:USD", "ATOM:USD"]
                .iter()
                .filter_map(|p| p.parse().ok())
                .collect(),
            min_voters: 4,
            slash_fraction: Dec::from_raw(5_000_000_000_000_000),
            slash_window: 100_800,
            min_valid_per_window: Dec::from_raw(690_000_000_000_000_000),
            expiration_blocks: 900,
            twap_lookback_window_ms: 15 * 60 * 1000,
        }
    }
}

impl Params {
    /// Check every field for a sane value.
    pub fn validate(&self) -> Result<(), TypesError> {
        let invalid = |msg: &str| Err(TypesError::InvalidParams(msg.to_string()));
        if self.vote_period == 0 {
            return invalid("vote period must be positive");
        }
        if !self.vote_threshold.is_positive() || self.vote_threshold > Dec::ONE {
            return invalid("vote threshold must be in (0, 1]");
        }
        if self.reward_band.is_negative() || self.reward_band > Dec::ONE {
            return invalid("reward band must be in [0, 1]");
        }
        if self.slash_fraction.is_negative() || self.slash_fraction > Dec::ONE {
            return invalid("slash fraction must be in [0, 1]");
        }
        if self.min_valid_per_window.is_negative() || self.min_valid_per_window > Dec::ONE {
            return invalid("min valid per window must be in [0, 1]");
        }
        if self.slash_window < self.vote_period {
            return invalid("slash window must be at least one vote period");
        }
        if self.twap_lookback_window_ms == 0 {
            return invalid("twap lookback window must be positive");
        }
        let unique: BTreeSet<&Pair> = self.whitelist.iter().collect();
        if unique.len() != self.whitelist.len() {
            return invalid("whitelist contains duplicate pairs");
        }
        Ok(())
    }

    /// Number of whole vote periods in one slash window.
    pub fn vote_periods_per_slash_window(&self) -> u64 {
        if self.vote_period == 0 {
            return 0;
        }
        self.slash_window / self.vote_period
    }

    /// Apply a partial update. Fields left as `None`, zero, or empty keep their
    /// current value.
    pub fn merge(&self, update: &ParamsUpdate) -> Params {
        let mut next = self.clone();
        fn pick_u64(current: &mut u64, new: Option<u64>) {
            if let Some(v) = new.filter(|v| *v != 0) {
                *current = v;
            }
        }
        fn pick_dec(current: &mut Dec, new: Option<Dec>) {
            if let Some(v) = new.filter(|v| !v.is_zero()) {
                *current = v;
            }
        }
        pick_u64(&mut next.vote_period, update.vote_period);
        pick_dec(&mut next.vote_threshold, update.vote_threshold);
        pick_dec(&mut next.reward_band, update.reward_band);
        pick_u64(&mut next.min_voters, update.min_voters);
        pick_dec(&mut next.slash_fraction, update.slash_fraction);
        pick_u64(&mut next.slash_window, update.slash_window);
        pick_dec(&mut next.min_valid_per_window, update.min_valid_per_window);
        pick_u64(&mut next.expiration_blocks, update.expiration_blocks);
        pick_u64(&mut next.twap_lookback_window_ms, update.twap_lookback_window_ms);
        if let Some(whitelist) = update.whitelist.as_ref().filter(|w| !w.is_empty()) {
            next.whitelist = whitelist.clone();
        }
        next
    }
}

/// A partial parameter update carried by the params-edit message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsUpdate {
    pub vote_period: Option<u64>,
    pub vote_threshold: Option<Dec>,
    pub reward_band: Option<Dec>,
    pub whitelist: Option<Vec<Pair>>,
    pub min_voters: Option<u64>,
    pub slash_fraction: Option<Dec>,
    pub slash_window: Option<u64>,
    pub min_valid_per_window: Option<Dec>,
    pub expiration_blocks: Option<u64>,
    pub twap_lookback_window_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = Params::default();
        params.validate().unwrap();
        assert_eq!(params.vote_periods_per_slash_window(), 10_080);
        assert_eq!(params.whitelist.len(), 3);
    }

    #[test]
    fn zero_vote_period_rejected() {
        let params = Params {
            vote_period: 0,
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let params = Params {
            vote_threshold: Dec::from_int(2),
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn duplicate_whitelist_rejected() {
        let btc: Pair = "BTC:USD".parse().unwrap();
        let params = Params {
            whitelist: vec![btc.clone(), btc],
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn merge_skips_unset_and_zero_fields() {
        let params = Params::default();
        let update = ParamsUpdate {
            vote_period: Some(0),
            min_voters: Some(2),
            reward_band: Some(Dec::ZERO),
            whitelist: Some(vec![]),
            ..ParamsUpdate::default()
        };
        let merged = params.merge(&update);
        assert_eq!(merged.vote_period, params.vote_period);
        assert_eq!(merged.reward_band, params.reward_band);
        assert_eq!(merged.whitelist, params.whitelist);
        assert_eq!(merged.min_voters, 2);
    }
}
