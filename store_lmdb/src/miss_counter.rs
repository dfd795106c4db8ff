//! LMDB implementation of MissCounterStore. Counts are stored as big-endian u64.

use augury_store::{MissCounterStore, StoreError};
use augury_types::ValAddress;

use crate::store::{decode_u64, decode_val_address, LmdbOracleStore};

impl MissCounterStore for LmdbOracleStore {
    fn get_miss_counter(&self, validator: &ValAddress) -> Result<Option<u64>, StoreError> {
        match self.get_raw(self.dbs.miss_counters, validator.as_bytes())? {
            Some(bytes) => Ok(Some(decode_u64(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_miss_counter(&self, validator: &ValAddress, count: u64) -> Result<(), StoreError> {
        self.put_raw(
            self.dbs.miss_counters,
            validator.as_bytes(),
            &count.to_be_bytes(),
        )?;
        Ok(())
    }

    fn delete_miss_counter(&self, validator: &ValAddress) -> Result<(), StoreError> {
        self.delete_raw(self.dbs.miss_counters, validator.as_bytes())?;
        Ok(())
    }

    fn iter_miss_counters(&self) -> Result<Vec<(ValAddress, u64)>, StoreError> {
        let mut results = Vec::new();
        for (key, value) in self.entries(self.dbs.miss_counters)? {
            results.push((decode_val_address(&key)?, decode_u64(&value)?));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::open_test_store;

    #[test]
    fn counters_overwrite_and_delete() {
        let (_dir, store) = open_test_store();
        let val = ValAddress::new([9; 20]);
        assert_eq!(store.get_miss_counter(&val).unwrap(), None);

        store.put_miss_counter(&val, 3).unwrap();
        store.put_miss_counter(&val, 4).unwrap();
        assert_eq!(store.get_miss_counter(&val).unwrap(), Some(4));
        assert_eq!(store.iter_miss_counters().unwrap(), vec![(val, 4)]);

        store.delete_miss_counter(&val).unwrap();
        assert!(store.iter_miss_counters().unwrap().is_empty());
    }

    #[test]
    fn short_counter_or_key_is_corruption() {
        let (_dir, store) = open_test_store();
        let val = ValAddress::new([9; 20]);
        store.put_raw(store.dbs.miss_counters, val.as_bytes(), &[1, 2, 3]).unwrap();
        assert!(matches!(
            store.get_miss_counter(&val),
            Err(StoreError::Corruption(_))
        ));

        store.put_raw(store.dbs.miss_counters, val.as_bytes(), &7u64.to_be_bytes()).unwrap();
        store.put_raw(store.dbs.miss_counters, b"short", &1u64.to_be_bytes()).unwrap();
        assert!(matches!(
            store.iter_miss_counters(),
            Err(StoreError::Corruption(_))
        ));
    }
}
