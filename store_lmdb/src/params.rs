//! LMDB implementation of ParamsStore.

use augury_store::{ParamsStore, StoreError};
use augury_types::Params;

use crate::store::{decode, encode, LmdbOracleStore};
use crate::LmdbError;

const PARAMS_KEY: &[u8] = b"params";

impl ParamsStore for LmdbOracleStore {
    fn get_params(&self) -> Result<Params, StoreError> {
        let bytes = self
            .get_raw(self.dbs.meta, PARAMS_KEY)?
            .ok_or_else(|| LmdbError::NotFound("params".into()))?;
        Ok(decode(&bytes)?)
    }

    fn put_params(&self, params: &Params) -> Result<(), StoreError> {
        self.put_raw(self.dbs.meta, PARAMS_KEY, &encode(params)?)?;
        Ok(())
    }
}
