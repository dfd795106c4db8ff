use augury_types::{Dec, Pair};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// The latest tallied price of a pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedPrice {
    pub exchange_rate: Dec,
    /// Height of the block whose end-block hook produced the price.
    pub created_block: u64,
    /// Block time in milliseconds when the price was produced.
    pub timestamp_ms: u64,
}

pub trait ExchangeRateStore {
    fn get_exchange_rate(&self, pair: &Pair) -> Result<Option<DatedPrice>, StoreError>;
    fn put_exchange_rate(&self, pair: &Pair, price: &DatedPrice) -> Result<(), StoreError>;
    fn delete_exchange_rate(&self, pair: &Pair) -> Result<(), StoreError>;
    fn iter_exchange_rates(&self) -> Result<Vec<(Pair, DatedPrice)>, StoreError>;
}
