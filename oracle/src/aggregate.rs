//! Ballot aggregation: per-period performances, votes grouped by pair, and the
//! threshold filter.

use augury_store::OracleStore;
use augury_types::{Dec, Pair, Params};
use std::collections::{BTreeMap, BTreeSet};

use crate::ballot::{Ballot, BallotVote};
use crate::collaborators::{tokens_to_power, BankKeeper, DistributionKeeper, StakingKeeper};
use crate::engine::OracleEngine;
use crate::error::OracleError;
use crate::performance::{ValidatorPerformance, ValidatorPerformances};

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// A fresh performance entry for each of the top `max_validators` bonded
    /// validators.
    pub fn new_validator_performances(&self) -> ValidatorPerformances {
        let power_reduction = self.staking.power_reduction();
        let max_validators = self.staking.max_validators() as usize;
        let mut performances = ValidatorPerformances::new();
        for validator in self
            .staking
            .validators_by_power()
            .into_iter()
            .filter(|v| v.is_bonded())
            .take(max_validators)
        {
            performances.insert(ValidatorPerformance::new(
                validator.consensus_power(power_reduction),
                validator.operator,
            ));
        }
        performances
    }

    /// Group stored votes into per-pair ballots.
    ///
    /// Votes from validators without a performance entry are skipped. Abstentions
    /// are kept with zero power.
    pub fn group_votes_by_pair(
        &self,
        performances: &ValidatorPerformances,
    ) -> Result<BTreeMap<Pair, Ballot>, OracleError> {
        let mut ballots: BTreeMap<Pair, Ballot> = BTreeMap::new();
        for vote in self.store.iter_votes()? {
            let Some(performance) = performances.get(&vote.voter) else {
                tracing::debug!(validator = %vote.voter, "skipping vote from inactive validator");
                continue;
            };
            for tuple in vote.exchange_rate_tuples {
                let power = if tuple.exchange_rate.is_positive() {
                    performance.power
                } else {
                    0
                };
                ballots.entry(tuple.pair.clone()).or_default().push(BallotVote::new(
                    tuple.pair,
                    tuple.exchange_rate,
                    vote.voter,
                    power,
                ));
            }
        }
        Ok(ballots)
    }

    /// Drop ballots for pairs outside `whitelisted`, and ballots that fail the power or
    /// voter-count threshold. Pairs failing the threshold also leave `whitelisted` for
    /// the rest of this period so nobody is penalised for them.
    pub fn remove_invalid_ballots(
        &self,
        ballots: &mut BTreeMap<Pair, Ballot>,
        whitelisted: &mut BTreeSet<Pair>,
        params: &Params,
    ) -> Result<(), OracleError> {
        let total_bonded_power = tokens_to_power(
            self.staking.total_bonded_tokens(),
            self.staking.power_reduction(),
        );
        let threshold = params
            .vote_threshold
            .checked_mul(Dec::from_u64(total_bonded_power))
            .ok_or(OracleError::Overflow("vote threshold"))?;

        ballots.retain(|pair, ballot| {
            if !whitelisted.contains(pair) {
                tracing::debug!(pair = %pair, "dropping ballot for non-whitelisted pair");
                return false;
            }
            if !ballot.passes_threshold(threshold, params.min_voters) {
                tracing::info!(
                    pair = %pair,
                    power = ballot.power(),
                    threshold = %threshold,
                    voters = ballot.num_valid_voters(),
                    min_voters = params.min_voters,
                    "ballot below threshold"
                );
                whitelisted.remove(pair);
                return false;
            }
            true
        });
        Ok(())
    }
}
