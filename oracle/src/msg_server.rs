//! Message handlers: commit-reveal voting, feeder delegation, parameter edits.
//!
//! Each handler checks everything before its first write, so a rejected message
//! leaves the store and the event buffer untouched. The stateless message checks run
//! here too, so calling a handler directly is as strict as [`OracleEngine::deliver`].

use augury_store::{AggregateExchangeRatePrevote, AggregateExchangeRateVote, OracleStore};
use augury_types::AggregateVoteHash;
use augury_utils::period_index;

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::context::BlockContext;
use crate::engine::OracleEngine;
use crate::error::OracleError;
use crate::events::OracleEvent;
use crate::msgs::{
    MsgAggregateExchangeRatePrevote, MsgAggregateExchangeRateVote, MsgDelegateFeedConsent,
    MsgEditOracleParams,
};

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// Record a hash commitment at the current height, replacing any earlier one.
    pub fn aggregate_exchange_rate_prevote(
        &self,
        ctx: &mut BlockContext,
        msg: &MsgAggregateExchangeRatePrevote,
    ) -> Result<(), OracleError> {
        self.validate_feeder(&msg.feeder, &msg.validator)?;
        msg.validate_basic()?;
        let hash = AggregateVoteHash::from_hex(&msg.hash)
            .map_err(|e| OracleError::InvalidHash(e.to_string()))?;

        self.store.put_prevote(&AggregateExchangeRatePrevote {
            hash,
            voter: msg.validator,
            submit_block: ctx.height(),
        })?;

        tracing::debug!(
            validator = %msg.validator,
            height = ctx.height(),
            "aggregate prevote accepted"
        );
        ctx.emit(OracleEvent::AggregatePrevote {
            validator: msg.validator,
            feeder: msg.feeder,
        });
        Ok(())
    }

    /// Reveal the rates committed in the previous vote period.
    pub fn aggregate_exchange_rate_vote(
        &self,
        ctx: &mut BlockContext,
        msg: &MsgAggregateExchangeRateVote,
    ) -> Result<(), OracleError> {
        self.validate_feeder(&msg.feeder, &msg.validator)?;
        msg.validate_basic()?;
        let params = self.store.get_params()?;

        let prevote = self
            .store
            .get_prevote(&msg.validator)?
            .ok_or(OracleError::NoPrevote(msg.validator))?;

        let prevote_period = period_index(prevote.submit_block, params.vote_period);
        let reveal_period = period_index(ctx.height(), params.vote_period);
        if reveal_period != prevote_period.saturating_add(1) {
            return Err(OracleError::WrongRevealPeriod {
                prevote_period,
                reveal_period,
            });
        }

        let tuples = msg.parse_tuples()?;
        for tuple in &tuples {
            if !self.store.is_whitelisted(&tuple.pair)? {
                return Err(OracleError::UnknownPair(tuple.pair.clone()));
            }
        }

        let hash = AggregateVoteHash::compute(&msg.salt, &msg.exchange_rates, &msg.validator);
        if hash != prevote.hash {
            return Err(OracleError::HashMismatch);
        }

        self.store.put_vote(&AggregateExchangeRateVote {
            exchange_rate_tuples: tuples.clone(),
            voter: msg.validator,
        })?;
        self.store.delete_prevote(&msg.validator)?;

        tracing::debug!(
            validator = %msg.validator,
            pairs = tuples.len(),
            "aggregate vote accepted"
        );
        ctx.emit(OracleEvent::AggregateVote {
            validator: msg.validator,
            feeder: msg.feeder,
            prices: tuples,
        });
        Ok(())
    }

    /// Let `delegate` submit votes for validator `operator`.
    pub fn delegate_feed_consent(
        &self,
        ctx: &mut BlockContext,
        msg: &MsgDelegateFeedConsent,
    ) -> Result<(), OracleError> {
        if self.staking.validator(&msg.operator).is_none() {
            return Err(OracleError::ValidatorNotFound(msg.operator));
        }
        self.store
            .put_feeder_delegation(&msg.operator, &msg.delegate)?;

        tracing::info!(
            validator = %msg.operator,
            feeder = %msg.delegate,
            "feeder delegation updated"
        );
        ctx.emit(OracleEvent::DelegateFeederConsent {
            validator: msg.operator,
            feeder: msg.delegate,
        });
        Ok(())
    }

    /// Merge a partial parameter update. Only admin accounts may do this.
    ///
    /// A changed whitelist takes effect for voting at the next vote period boundary.
    pub fn edit_oracle_params(
        &self,
        ctx: &mut BlockContext,
        msg: &MsgEditOracleParams,
    ) -> Result<(), OracleError> {
        if !self.admins.contains(&msg.sender) {
            return Err(OracleError::NotAdmin(msg.sender));
        }
        let merged = self.store.get_params()?.merge(&msg.update);
        merged
            .validate()
            .map_err(|e| OracleError::InvalidParams(e.to_string()))?;
        self.store.put_params(&merged)?;

        tracing::info!(sender = %msg.sender, "oracle params updated");
        ctx.emit(OracleEvent::ParamsUpdated { sender: msg.sender });
        Ok(())
    }
}
