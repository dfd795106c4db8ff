//! Shared fixture for oracle scenario tests: an engine over nullable collaborators.

#![allow(dead_code)]

use augury_nullables::{NullBank, NullDistribution, NullOracleStore, NullStaking};
use augury_oracle::{
    BlockContext, MsgAggregateExchangeRatePrevote, MsgAggregateExchangeRateVote, OracleConfig,
    OracleEngine, OracleError, OracleMsg,
};
use augury_types::{AccAddress, AggregateVoteHash, Dec, Pair, Params, ValAddress};

pub type TestEngine = OracleEngine<NullOracleStore, NullStaking, NullBank, NullDistribution>;

pub const POWER: u64 = 100;
pub const BLOCK_TIME_MS: u64 = 5_000;
pub const SALT: &str = "1";

pub struct Fixture {
    pub engine: TestEngine,
    pub validators: Vec<ValAddress>,
    pub admin: AccAddress,
}

pub fn val(i: usize) -> ValAddress {
    ValAddress::new([i as u8 + 1; 20])
}

pub fn pair(s: &str) -> Pair {
    s.parse().unwrap()
}

pub fn dec(s: &str) -> Dec {
    s.parse().unwrap()
}

/// One-block vote periods over BTC:USD and ETH:USD, a 100-block slash window and a
/// single required voter.
pub fn test_params() -> Params {
    Params {
        vote_period: 1,
        whitelist: vec![pair("BTC:USD"), pair("ETH:USD")],
        min_voters: 1,
        slash_window: 100,
        ..Params::default()
    }
}

pub fn ctx_at(height: u64) -> BlockContext {
    BlockContext::new(height, height * BLOCK_TIME_MS)
}

impl Fixture {
    pub fn new(num_validators: usize) -> Self {
        Self::with_params(num_validators, test_params())
    }

    pub fn with_params(num_validators: usize, params: Params) -> Self {
        let staking = NullStaking::new();
        let validators: Vec<ValAddress> = (0..num_validators).map(val).collect();
        for v in &validators {
            staking.add_bonded_validator(*v, POWER);
        }
        let bank = NullBank::with_modules(&["oracle", "distribution", "funder"]);
        let admin = AccAddress::new([0xAD; 20]);
        let config = OracleConfig {
            admins: vec![admin],
            ..OracleConfig::default()
        };
        let engine = OracleEngine::new(
            NullOracleStore::new(),
            staking,
            bank,
            NullDistribution::new(),
            &config,
        )
        .unwrap();
        engine.initialize(&params).unwrap();
        Self {
            engine,
            validators,
            admin,
        }
    }

    pub fn params(&self) -> Params {
        self.engine.params().unwrap()
    }

    pub fn prevote(
        &self,
        ctx: &mut BlockContext,
        validator: ValAddress,
        rates: &str,
    ) -> Result<(), OracleError> {
        let hash = AggregateVoteHash::compute(SALT, rates, &validator);
        self.engine.deliver(
            ctx,
            OracleMsg::AggregateExchangeRatePrevote(MsgAggregateExchangeRatePrevote::new(
                hash,
                AccAddress::from(&validator),
                validator,
            )),
        )
    }

    pub fn vote(
        &self,
        ctx: &mut BlockContext,
        validator: ValAddress,
        rates: &str,
    ) -> Result<(), OracleError> {
        self.engine.deliver(
            ctx,
            OracleMsg::AggregateExchangeRateVote(MsgAggregateExchangeRateVote::new(
                SALT,
                rates,
                AccAddress::from(&validator),
                validator,
            )),
        )
    }

    /// Commit at `height - 1` and reveal at `height` for each `(validator index, rates)`.
    /// Returns the reveal block's context; the end-block hook has not run yet.
    pub fn commit_and_reveal(&self, height: u64, votes: &[(usize, &str)]) -> BlockContext {
        let mut commit_ctx = ctx_at(height - 1);
        for (i, rates) in votes {
            self.prevote(&mut commit_ctx, self.validators[*i], rates)
                .unwrap();
        }
        let mut reveal_ctx = ctx_at(height);
        for (i, rates) in votes {
            self.vote(&mut reveal_ctx, self.validators[*i], rates).unwrap();
        }
        reveal_ctx
    }

    /// Run one full vote period ending at `height`.
    pub fn run_period(&self, height: u64, votes: &[(usize, &str)]) -> BlockContext {
        let mut ctx = self.commit_and_reveal(height, votes);
        self.engine.end_blocker(&mut ctx).unwrap();
        ctx
    }
}
