//! Read-only projections of oracle state.

use augury_store::{
    AggregateExchangeRatePrevote, AggregateExchangeRateVote, OracleStore, RewardPool,
};
use augury_types::{AccAddress, Dec, Pair, Params, ValAddress};

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::engine::OracleEngine;
use crate::error::OracleError;

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    pub fn params(&self) -> Result<Params, OracleError> {
        Ok(self.store.get_params()?)
    }

    pub fn exchange_rate(&self, pair: &Pair) -> Result<Dec, OracleError> {
        self.store
            .get_exchange_rate(pair)?
            .map(|p| p.exchange_rate)
            .ok_or_else(|| OracleError::PriceNotFound(pair.clone()))
    }

    pub fn exchange_rates(&self) -> Result<Vec<(Pair, Dec)>, OracleError> {
        Ok(self
            .store
            .iter_exchange_rates()?
            .into_iter()
            .map(|(pair, p)| (pair, p.exchange_rate))
            .collect())
    }

    /// Pairs that currently have a price.
    pub fn actives(&self) -> Result<Vec<Pair>, OracleError> {
        Ok(self
            .store
            .iter_exchange_rates()?
            .into_iter()
            .map(|(pair, _)| pair)
            .collect())
    }

    /// Pairs currently accepted in votes.
    pub fn vote_targets(&self) -> Result<Vec<Pair>, OracleError> {
        Ok(self.store.iter_whitelisted_pairs()?)
    }

    /// The account allowed to feed for `validator`; its own account by default.
    pub fn feeder_delegation(&self, validator: &ValAddress) -> Result<AccAddress, OracleError> {
        Ok(self
            .store
            .get_feeder_delegation(validator)?
            .unwrap_or_else(|| AccAddress::from(validator)))
    }

    pub fn miss_counter(&self, validator: &ValAddress) -> Result<u64, OracleError> {
        Ok(self.store.get_miss_counter(validator)?.unwrap_or(0))
    }

    pub fn aggregate_prevote(
        &self,
        validator: &ValAddress,
    ) -> Result<AggregateExchangeRatePrevote, OracleError> {
        self.store
            .get_prevote(validator)?
            .ok_or(OracleError::NoPrevote(*validator))
    }

    pub fn aggregate_prevotes(&self) -> Result<Vec<AggregateExchangeRatePrevote>, OracleError> {
        Ok(self.store.iter_prevotes()?)
    }

    pub fn aggregate_vote(
        &self,
        validator: &ValAddress,
    ) -> Result<Option<AggregateExchangeRateVote>, OracleError> {
        Ok(self.store.get_vote(validator)?)
    }

    pub fn aggregate_votes(&self) -> Result<Vec<AggregateExchangeRateVote>, OracleError> {
        Ok(self.store.iter_votes()?)
    }

    pub fn reward_pools(&self) -> Result<Vec<RewardPool>, OracleError> {
        Ok(self.store.iter_reward_pools()?)
    }
}
