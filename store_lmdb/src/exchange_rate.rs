//! LMDB implementation of ExchangeRateStore.

use augury_store::{DatedPrice, ExchangeRateStore, StoreError};
use augury_types::Pair;

use crate::store::{decode, decode_pair, encode, LmdbOracleStore};

impl ExchangeRateStore for LmdbOracleStore {
    fn get_exchange_rate(&self, pair: &Pair) -> Result<Option<DatedPrice>, StoreError> {
        match self.get_raw(self.dbs.exchange_rates, pair.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_exchange_rate(&self, pair: &Pair, price: &DatedPrice) -> Result<(), StoreError> {
        self.put_raw(
            self.dbs.exchange_rates,
            pair.as_str().as_bytes(),
            &encode(price)?,
        )?;
        Ok(())
    }

    fn delete_exchange_rate(&self, pair: &Pair) -> Result<(), StoreError> {
        self.delete_raw(self.dbs.exchange_rates, pair.as_str().as_bytes())?;
        Ok(())
    }

    fn iter_exchange_rates(&self) -> Result<Vec<(Pair, DatedPrice)>, StoreError> {
        let mut results = Vec::new();
        for (key, value) in self.entries(self.dbs.exchange_rates)? {
            results.push((decode_pair(&key)?, decode(&value)?));
        }
        Ok(results)
    }
}
