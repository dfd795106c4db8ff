//! LMDB implementation of WhitelistStore: a key set of pair strings.

use augury_store::{StoreError, WhitelistStore};
use augury_types::Pair;

use crate::store::{decode_pair, LmdbOracleStore};

impl WhitelistStore for LmdbOracleStore {
    fn is_whitelisted(&self, pair: &Pair) -> Result<bool, StoreError> {
        Ok(self
            .get_raw(self.dbs.whitelist, pair.as_str().as_bytes())?
            .is_some())
    }

    fn insert_whitelisted_pair(&self, pair: &Pair) -> Result<(), StoreError> {
        self.put_raw(self.dbs.whitelist, pair.as_str().as_bytes(), &[])?;
        Ok(())
    }

    fn delete_whitelisted_pair(&self, pair: &Pair) -> Result<(), StoreError> {
        self.delete_raw(self.dbs.whitelist, pair.as_str().as_bytes())?;
        Ok(())
    }

    fn iter_whitelisted_pairs(&self) -> Result<Vec<Pair>, StoreError> {
        let mut results = Vec::new();
        for (key, _) in self.entries(self.dbs.whitelist)? {
            results.push(decode_pair(&key)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::open_test_store;

    #[test]
    fn whitelist_is_a_sorted_set() {
        let (_dir, store) = open_test_store();
        let eth: Pair = "ETH:USD".parse().unwrap();
        let btc: Pair = "BTC:USD".parse().unwrap();

        store.insert_whitelisted_pair(&eth).unwrap();
        store.insert_whitelisted_pair(&btc).unwrap();
        store.insert_whitelisted_pair(&btc).unwrap();
        assert_eq!(store.iter_whitelisted_pairs().unwrap(), vec![btc.clone(), eth.clone()]);

        store.delete_whitelisted_pair(&eth).unwrap();
        assert!(!store.is_whitelisted(&eth).unwrap());
        assert!(store.is_whitelisted(&btc).unwrap());
    }
}
