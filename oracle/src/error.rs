use augury_store::StoreError;
use augury_types::{AccAddress, Pair, TypesError, ValAddress};
use thiserror::Error;

use crate::collaborators::CollaboratorError;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("feeder {feeder} is not authorised to vote for {validator}")]
    Unauthorized {
        feeder: AccAddress,
        validator: ValAddress,
    },

    #[error("validator {0} is not bonded")]
    ValidatorNotBonded(ValAddress),

    #[error("validator {0} does not exist")]
    ValidatorNotFound(ValAddress),

    #[error("no aggregate prevote from {0}")]
    NoPrevote(ValAddress),

    #[error("reveal at period {reveal_period} does not follow prevote period {prevote_period}")]
    WrongRevealPeriod {
        prevote_period: u64,
        reveal_period: u64,
    },

    #[error("revealed rates do not match the committed hash")]
    HashMismatch,

    #[error("invalid vote hash: {0}")]
    InvalidHash(String),

    #[error("malformed exchange rate payload: {0}")]
    MalformedPayload(String),

    #[error("pair {0} is not whitelisted")]
    UnknownPair(Pair),

    #[error("salt length {0} out of range [1, 4]")]
    InvalidSaltLength(usize),

    #[error("exchange rate out of range: {0}")]
    RateOverflow(String),

    #[error("exchange rate payload is empty")]
    EmptyPayload,

    #[error("exchange rate payload too long: {len} > {max}")]
    PayloadTooLong { len: usize, max: usize },

    #[error("sender {0} may not edit oracle params")]
    NotAdmin(AccAddress),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid reward allocation: {0}")]
    InvalidRewardAllocation(String),

    #[error("module account {0:?} does not exist")]
    ModuleAccountMissing(String),

    #[error("no price for pair {0}")]
    PriceNotFound(Pair),

    #[error("no valid TWAP for pair {pair}: {reason}")]
    NoValidTwap { pair: Pair, reason: String },

    #[error("ballot must be sorted by exchange rate before taking the median")]
    UnsortedBallot,

    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}
