use augury_types::{AggregateVoteHash, ValAddress};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// A validator's committed hash, awaiting its reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateExchangeRatePrevote {
    pub hash: AggregateVoteHash,
    pub voter: ValAddress,
    pub submit_block: u64,
}

/// At most one prevote per validator; a new one replaces the old.
pub trait PrevoteStore {
    fn get_prevote(
        &self,
        voter: &ValAddress,
    ) -> Result<Option<AggregateExchangeRatePrevote>, StoreError>;
    fn put_prevote(&self, prevote: &AggregateExchangeRatePrevote) -> Result<(), StoreError>;
    fn delete_prevote(&self, voter: &ValAddress) -> Result<(), StoreError>;
    fn iter_prevotes(&self) -> Result<Vec<AggregateExchangeRatePrevote>, StoreError>;
}
