//! Miss counting across a slash window, and the window-end slash.

use augury_store::OracleStore;
use augury_types::Dec;

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::context::BlockContext;
use crate::engine::OracleEngine;
use crate::error::OracleError;
use crate::events::OracleEvent;
use crate::performance::ValidatorPerformances;

/// Blocks between a staking change and its effect on the validator set.
pub const VALIDATOR_UPDATE_DELAY: i64 = 1;

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// Add this period's misses to each validator's running counter.
    pub fn increment_miss_counters(
        &self,
        performances: &ValidatorPerformances,
    ) -> Result<(), OracleError> {
        for performance in performances.values() {
            if performance.miss_count == 0 {
                continue;
            }
            let validator = &performance.val_address;
            let current = self.store.get_miss_counter(validator)?.unwrap_or(0);
            let updated = current.saturating_add(performance.miss_count);
            self.store.put_miss_counter(validator, updated)?;
            tracing::info!(
                validator = %validator,
                missed = performance.miss_count,
                window_total = updated,
                "vote miss"
            );
        }
        Ok(())
    }

    /// Slash and jail every validator whose valid-vote rate over the window fell below
    /// `min_valid_per_window`, then clear all miss counters.
    pub fn slash_and_reset_miss_counters(&self, ctx: &mut BlockContext) -> Result<(), OracleError> {
        let params = self.store.get_params()?;
        let height = i64::try_from(ctx.height()).map_err(|_| OracleError::Overflow("height"))?;
        let distribution_height = height - VALIDATOR_UPDATE_DELAY - 1;
        let periods = params.vote_periods_per_slash_window();
        let power_reduction = self.staking.power_reduction();

        for (operator, miss_count) in self.store.iter_miss_counters()? {
            let valid_periods = periods.saturating_sub(miss_count);
            let valid_rate = Dec::from_ratio(valid_periods, periods).unwrap_or(Dec::ZERO);

            if valid_rate < params.min_valid_per_window {
                if let Some(validator) = self.staking.validator(&operator) {
                    if validator.is_bonded() && !validator.jailed {
                        let power = validator.consensus_power(power_reduction);
                        let burned = self.staking.slash(
                            &validator.cons_address,
                            distribution_height,
                            power,
                            params.slash_fraction,
                        )?;
                        self.staking.jail(&validator.cons_address)?;

                        tracing::warn!(
                            validator = %operator,
                            miss_count,
                            valid_rate = %valid_rate,
                            burned,
                            "validator slashed and jailed for missing oracle votes"
                        );
                        ctx.emit(OracleEvent::Slash {
                            validator: operator,
                            power,
                            fraction: params.slash_fraction,
                            infraction_height: distribution_height,
                        });
                    }
                }
            }

            self.store.delete_miss_counter(&operator)?;
        }
        Ok(())
    }
}
