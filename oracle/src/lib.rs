//! Commit-reveal price oracle for a proof-of-stake chain.
//!
//! Validators (or their delegated feeders) commit to a hash of their exchange rates in
//! one vote period and reveal the rates in the next. On the last block of each period
//! the engine groups the revealed votes by pair, drops ballots without enough power or
//! voters, takes the power-weighted median as the new price, rewards validators whose
//! votes landed inside the reward band and counts misses for the rest. At the end of
//! each slash window validators with too many misses are slashed and jailed.
//!
//! All state lives behind the `augury-store` traits and all chain interaction behind
//! the collaborator traits in [`collaborators`], so the engine is deterministic and
//! testable in isolation.

pub mod ballot;
pub mod collaborators;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod msgs;
pub mod performance;
pub mod slashing;
pub mod tally;

mod aggregate;
mod end_block;
mod engine;
mod msg_server;
mod prices;
mod query;
mod rewards;
mod whitelist;

pub use ballot::{Ballot, BallotVote};
pub use collaborators::{
    BankKeeper, BondStatus, CollaboratorError, DistributionKeeper, StakingKeeper, ValidatorInfo,
};
pub use config::OracleConfig;
pub use context::BlockContext;
pub use engine::{ModuleAccounts, OracleEngine};
pub use error::OracleError;
pub use events::OracleEvent;
pub use msgs::{
    MsgAggregateExchangeRatePrevote, MsgAggregateExchangeRateVote, MsgDelegateFeedConsent,
    MsgEditOracleParams, OracleMsg,
};
pub use performance::{ValidatorPerformance, ValidatorPerformances};
pub use tally::{tally, TallyResult};
