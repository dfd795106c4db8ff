//! LMDB implementation of FeederDelegationStore.

use augury_store::{FeederDelegationStore, StoreError};
use augury_types::{AccAddress, ValAddress};

use crate::store::{decode_val_address, LmdbOracleStore};
use crate::LmdbError;

fn decode_acc_address(bytes: &[u8]) -> Result<AccAddress, LmdbError> {
    AccAddress::from_slice(bytes).map_err(|e| LmdbError::Corruption(e.to_string()))
}

impl FeederDelegationStore for LmdbOracleStore {
    fn get_feeder_delegation(
        &self,
        validator: &ValAddress,
    ) -> Result<Option<AccAddress>, StoreError> {
        match self.get_raw(self.dbs.delegations, validator.as_bytes())? {
            Some(bytes) => Ok(Some(decode_acc_address(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_feeder_delegation(
        &self,
        validator: &ValAddress,
        feeder: &AccAddress,
    ) -> Result<(), StoreError> {
        self.put_raw(self.dbs.delegations, validator.as_bytes(), feeder.as_bytes())?;
        Ok(())
    }

    fn iter_feeder_delegations(&self) -> Result<Vec<(ValAddress, AccAddress)>, StoreError> {
        let mut results = Vec::new();
        for (key, value) in self.entries(self.dbs.delegations)? {
            results.push((decode_val_address(&key)?, decode_acc_address(&value)?));
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::open_test_store;

    #[test]
    fn delegation_round_trips() {
        let (_dir, store) = open_test_store();
        let val = ValAddress::new([1; 20]);
        let feeder = AccAddress::new([2; 20]);
        assert_eq!(store.get_feeder_delegation(&val).unwrap(), None);

        store.put_feeder_delegation(&val, &feeder).unwrap();
        assert_eq!(store.get_feeder_delegation(&val).unwrap(), Some(feeder));
        assert_eq!(store.iter_feeder_delegations().unwrap(), vec![(val, feeder)]);
    }
}
