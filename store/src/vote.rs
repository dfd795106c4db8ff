use augury_types::{ExchangeRateTuple, ValAddress};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A validator's revealed rates for the current vote period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateExchangeRateVote {
    pub exchange_rate_tuples: Vec<ExchangeRateTuple>,
    pub voter: ValAddress,
}

pub trait VoteStore {
    fn get_vote(&self, voter: &ValAddress)
        -> Result<Option<AggregateExchangeRateVote>, StoreError>;
    fn put_vote(&self, vote: &AggregateExchangeRateVote) -> Result<(), StoreError>;
    fn delete_vote(&self, voter: &ValAddress) -> Result<(), StoreError>;
    fn iter_votes(&self) -> Result<Vec<AggregateExchangeRateVote>, StoreError>;
}
