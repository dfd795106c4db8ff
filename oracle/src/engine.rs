//! The oracle engine: owns the store and collaborators and exposes every operation.
//!
//! Operations are split across modules by concern (`msg_server`, `prices`, `rewards`,
//! `slashing`, `whitelist`, `end_block`, `query`), each adding an `impl` block here.

use augury_store::OracleStore;
use augury_types::{AccAddress, Params, ValAddress};
use std::collections::BTreeSet;

use crate::collaborators::{BankKeeper, DistributionKeeper, StakingKeeper};
use crate::config::OracleConfig;
use crate::context::BlockContext;
use crate::error::OracleError;
use crate::msgs::OracleMsg;

/// Names of the module accounts the oracle moves funds through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleAccounts {
    pub oracle: String,
    pub distribution: String,
}

pub struct OracleEngine<S, K, B, D> {
    pub(crate) store: S,
    pub(crate) staking: K,
    pub(crate) bank: B,
    pub(crate) distribution: D,
    pub(crate) accounts: ModuleAccounts,
    pub(crate) admins: BTreeSet<AccAddress>,
}

impl<S, K, B, D> OracleEngine<S, K, B, D>
where
    S: OracleStore,
    K: StakingKeeper,
    B: BankKeeper,
    D: DistributionKeeper,
{
    /// Build an engine. Fails if either module account is unknown to the bank.
    pub fn new(
        store: S,
        staking: K,
        bank: B,
        distribution: D,
        config: &OracleConfig,
    ) -> Result<Self, OracleError> {
        for module in [&config.oracle_module, &config.distribution_module] {
            if !bank.has_module_account(module) {
                return Err(OracleError::ModuleAccountMissing(module.clone()));
            }
        }
        Ok(Self {
            store,
            staking,
            bank,
            distribution,
            accounts: ModuleAccounts {
                oracle: config.oracle_module.clone(),
                distribution: config.distribution_module.clone(),
            },
            admins: config.admins.iter().copied().collect(),
        })
    }

    /// Store the genesis parameters and seed the active whitelist from them.
    pub fn initialize(&self, params: &Params) -> Result<(), OracleError> {
        params
            .validate()
            .map_err(|e| OracleError::InvalidParams(e.to_string()))?;
        self.store.put_params(params)?;
        for pair in self.store.iter_whitelisted_pairs()? {
            self.store.delete_whitelisted_pair(&pair)?;
        }
        for pair in &params.whitelist {
            self.store.insert_whitelisted_pair(pair)?;
        }
        tracing::info!(
            pairs = params.whitelist.len(),
            vote_period = params.vote_period,
            "oracle initialised"
        );
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn staking(&self) -> &K {
        &self.staking
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    pub fn module_accounts(&self) -> &ModuleAccounts {
        &self.accounts
    }

    /// Validate a message statelessly, then apply it.
    pub fn deliver(&self, ctx: &mut BlockContext, msg: OracleMsg) -> Result<(), OracleError> {
        msg.validate_basic()?;
        match msg {
            OracleMsg::AggregateExchangeRatePrevote(msg) => {
                self.aggregate_exchange_rate_prevote(ctx, &msg)
            }
            OracleMsg::AggregateExchangeRateVote(msg) => {
                self.aggregate_exchange_rate_vote(ctx, &msg)
            }
            OracleMsg::DelegateFeedConsent(msg) => self.delegate_feed_consent(ctx, &msg),
            OracleMsg::EditOracleParams(msg) => self.edit_oracle_params(ctx, &msg),
        }
    }

    /// Check that `feeder` may vote for `validator` and that the validator is bonded.
    ///
    /// The validator's own operator account is always allowed; any other account must
    /// be its registered feeder delegate.
    pub fn validate_feeder(
        &self,
        feeder: &AccAddress,
        validator: &ValAddress,
    ) -> Result<(), OracleError> {
        if *feeder != AccAddress::from(validator) {
            let delegate = self
                .store
                .get_feeder_delegation(validator)?
                .unwrap_or_else(|| AccAddress::from(validator));
            if delegate != *feeder {
                return Err(OracleError::Unauthorized {
                    feeder: *feeder,
                    validator: *validator,
                });
            }
        }
        match self.staking.validator(validator) {
            Some(info) if info.is_bonded() => Ok(()),
            _ => Err(OracleError::ValidatorNotBonded(*validator)),
        }
    }
}
