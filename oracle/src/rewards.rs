//! Reward pools and their per-period distribution to winning voters.

use augury_store::{OracleStore, RewardPool};
use augury_types::Coins;

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::engine::OracleEngine;
use crate::error::OracleError;
use crate::performance::ValidatorPerformances;

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// Fund a new reward pool paying `coins / vote_periods` per period.
    ///
    /// The full amount moves from `source_module` into the oracle account up front.
    /// Returns the new pool id.
    pub fn allocate_rewards(
        &self,
        source_module: &str,
        coins: &Coins,
        vote_periods: u64,
    ) -> Result<u64, OracleError> {
        if vote_periods == 0 {
            return Err(OracleError::InvalidRewardAllocation(
                "vote periods must be positive".into(),
            ));
        }
        if coins.is_empty() {
            return Err(OracleError::InvalidRewardAllocation(
                "no coins to allocate".into(),
            ));
        }
        let per_period = coins
            .quo_int(vote_periods)
            .ok_or(OracleError::Overflow("reward split"))?;

        self.bank
            .send_coins_from_module_to_module(source_module, &self.accounts.oracle, coins)?;

        let id = self.store.next_reward_id()?;
        self.store.put_reward_pool(&RewardPool {
            id,
            vote_periods,
            coins: per_period,
        })?;
        tracing::info!(
            id,
            source = source_module,
            coins = %coins,
            vote_periods,
            "reward pool funded"
        );
        Ok(id)
    }

    /// Take one period's worth from every live pool, retiring exhausted pools.
    pub fn gather_rewards_for_vote_period(&self) -> Result<Coins, OracleError> {
        let mut total = Coins::empty();
        for mut pool in self.store.iter_reward_pools()? {
            total = total
                .checked_add(&pool.coins)
                .ok_or(OracleError::Overflow("reward gather"))?;
            pool.vote_periods = pool.vote_periods.saturating_sub(1);
            if pool.vote_periods == 0 {
                self.store.delete_reward_pool(pool.id)?;
            } else {
                self.store.put_reward_pool(&pool)?;
            }
        }
        Ok(total)
    }

    /// Split this period's rewards across validators by reward weight.
    ///
    /// Nothing is gathered when no validator won a pair, so pools keep their
    /// remaining periods. Truncation dust stays in the oracle account.
    pub fn reward_winners(
        &self,
        performances: &ValidatorPerformances,
    ) -> Result<Coins, OracleError> {
        let total_weight = performances.total_reward_weight();
        if total_weight == 0 {
            return Ok(Coins::empty());
        }

        let period_rewards = self.gather_rewards_for_vote_period()?;
        if period_rewards.is_empty() {
            return Ok(Coins::empty());
        }

        let mut distributed = Coins::empty();
        for performance in performances.values() {
            if performance.reward_weight == 0 {
                continue;
            }
            let Some(validator) = self.staking.validator(&performance.val_address) else {
                continue;
            };
            let portion = period_rewards
                .mul_div_floor(performance.reward_weight, total_weight)
                .ok_or(OracleError::Overflow("reward portion"))?;
            if portion.is_empty() {
                continue;
            }
            self.distribution
                .allocate_tokens_to_validator(&validator, &portion)?;
            distributed = distributed
                .checked_add(&portion)
                .ok_or(OracleError::Overflow("reward total"))?;
        }

        if !distributed.is_empty() {
            self.bank.send_coins_from_module_to_module(
                &self.accounts.oracle,
                &self.accounts.distribution,
                &distributed,
            )?;
        }
        tracing::debug!(
            gathered = %period_rewards,
            distributed = %distributed,
            winners = performances.values().filter(|p| p.reward_weight > 0).count(),
            "rewards distributed"
        );
        Ok(distributed)
    }
}
