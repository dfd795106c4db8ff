//! The end-block hook and the per-period pipeline it drives.

use augury_store::OracleStore;
use augury_utils::is_period_last_block;

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::context::BlockContext;
use crate::engine::OracleEngine;
use crate::error::OracleError;
use crate::events::OracleEvent;
use crate::performance::ValidatorPerformances;
use crate::tally::tally;

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// Run once at the end of every block.
    ///
    /// Expired prices are purged every block. The last block of a vote period tallies
    /// the period's votes; the last block of a slash window also slashes.
    pub fn end_blocker(&self, ctx: &mut BlockContext) -> Result<(), OracleError> {
        let params = self.store.get_params()?;
        self.clear_expired_exchange_rates(ctx, &params)?;

        if is_period_last_block(ctx.height(), params.vote_period) {
            self.update_exchange_rates(ctx)?;
        }
        if is_period_last_block(ctx.height(), params.slash_window) {
            self.slash_and_reset_miss_counters(ctx)?;
        }
        Ok(())
    }

    /// Tally every pair, account misses and rewards, clear the period's votes,
    /// reconcile the whitelist, and emit one performance event per validator.
    pub fn update_exchange_rates(
        &self,
        ctx: &mut BlockContext,
    ) -> Result<ValidatorPerformances, OracleError> {
        let params = self.store.get_params()?;
        let mut performances = self.new_validator_performances();
        let mut whitelisted = self.whitelisted_pairs()?;

        let mut ballots = self.group_votes_by_pair(&performances)?;
        self.remove_invalid_ballots(&mut ballots, &mut whitelisted, &params)?;

        for (pair, mut ballot) in ballots {
            let result = tally(&mut ballot, params.reward_band, &mut performances)?;
            self.set_price(ctx, &pair, result.median)?;
        }

        self.increment_miss_counters(&performances)?;
        performances.increment_abstains_by_omission(whitelisted.len() as u64);
        self.reward_winners(&performances)?;
        self.clear_votes_and_prevotes(ctx, params.vote_period)?;
        self.refresh_whitelist(&params.whitelist, &whitelisted)?;
        self.prune_price_snapshots(ctx, &params)?;

        for performance in performances.values() {
            ctx.emit(OracleEvent::ValidatorPerformance {
                validator: performance.val_address,
                voting_power: performance.power,
                reward_weight: performance.reward_weight,
                win_count: performance.win_count,
                abstain_count: performance.abstain_count,
                miss_count: performance.miss_count,
            });
        }
        Ok(performances)
    }

    /// Delete every vote, and every prevote older than one vote period.
    pub fn clear_votes_and_prevotes(
        &self,
        ctx: &BlockContext,
        vote_period: u64,
    ) -> Result<(), OracleError> {
        for prevote in self.store.iter_prevotes()? {
            if ctx.height() > prevote.submit_block.saturating_add(vote_period) {
                self.store.delete_prevote(&prevote.voter)?;
            }
        }
        for vote in self.store.iter_votes()? {
            self.store.delete_vote(&vote.voter)?;
        }
        Ok(())
    }
}
