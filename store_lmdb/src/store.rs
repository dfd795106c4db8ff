//! The LMDB-backed oracle store and the byte-level helpers its trait impls share.

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};
use serde::de::DeserializeOwned;
use serde::Serialize;

use augury_types::{Pair, ValAddress};

use crate::LmdbError;

#[derive(Clone, Copy)]
pub(crate) struct OracleDatabases {
    pub(crate) meta: Database<Bytes, Bytes>,
    pub(crate) exchange_rates: Database<Bytes, Bytes>,
    pub(crate) snapshots: Database<Bytes, Bytes>,
    pub(crate) prevotes: Database<Bytes, Bytes>,
    pub(crate) votes: Database<Bytes, Bytes>,
    pub(crate) delegations: Database<Bytes, Bytes>,
    pub(crate) miss_counters: Database<Bytes, Bytes>,
    pub(crate) whitelist: Database<Bytes, Bytes>,
    pub(crate) reward_pools: Database<Bytes, Bytes>,
}

/// Implements every `augury-store` trait over one LMDB environment.
///
/// Each trait method runs in its own transaction.
pub struct LmdbOracleStore {
    pub(crate) env: Arc<Env>,
    pub(crate) dbs: OracleDatabases,
}

impl LmdbOracleStore {
    pub(crate) fn put_raw(
        &self,
        db: Database<Bytes, Bytes>,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        db.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        Ok(())
    }

    pub(crate) fn get_raw(
        &self,
        db: Database<Bytes, Bytes>,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        Ok(db.get(&rtxn, key)?.map(<[u8]>::to_vec))
    }

    pub(crate) fn delete_raw(
        &self,
        db: Database<Bytes, Bytes>,
        key: &[u8],
    ) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        db.delete(&mut wtxn, key)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Every entry of `db` in key order.
    pub(crate) fn entries(
        &self,
        db: Database<Bytes, Bytes>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut out = Vec::new();
        for entry in db.iter(&rtxn)? {
            let (key, value) = entry?;
            out.push((key.to_vec(), value.to_vec()));
        }
        Ok(out)
    }

    /// Entries whose key starts with `prefix`, in key order.
    pub(crate) fn prefixed_entries(
        &self,
        db: Database<Bytes, Bytes>,
        prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let mut out = Vec::new();
        for entry in db.prefix_iter(&rtxn, prefix)? {
            let (key, value) = entry?;
            out.push((key.to_vec(), value.to_vec()));
        }
        Ok(out)
    }

    /// Read-modify-write a single key inside one write transaction.
    pub(crate) fn update_raw<F>(
        &self,
        db: Database<Bytes, Bytes>,
        key: &[u8],
        f: F,
    ) -> Result<Vec<u8>, LmdbError>
    where
        F: FnOnce(Option<&[u8]>) -> Result<Vec<u8>, LmdbError>,
    {
        let mut wtxn = self.env.write_txn()?;
        let current = db.get(&wtxn, key)?.map(<[u8]>::to_vec);
        let next = f(current.as_deref())?;
        db.put(&mut wtxn, key, &next)?;
        wtxn.commit()?;
        Ok(next)
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LmdbError> {
    Ok(bincode::serialize(value)?)
}

// Stored keys and values that fail to decode are reported as corruption.

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LmdbError> {
    bincode::deserialize(bytes).map_err(|e| LmdbError::Corruption(e.to_string()))
}

pub(crate) fn decode_val_address(key: &[u8]) -> Result<ValAddress, LmdbError> {
    ValAddress::from_slice(key).map_err(|e| LmdbError::Corruption(e.to_string()))
}

pub(crate) fn decode_pair(key: &[u8]) -> Result<Pair, LmdbError> {
    std::str::from_utf8(key)
        .map_err(|e| LmdbError::Corruption(e.to_string()))?
        .parse()
        .map_err(|e: augury_types::TypesError| LmdbError::Corruption(e.to_string()))
}

pub(crate) fn decode_u64(bytes: &[u8]) -> Result<u64, LmdbError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| LmdbError::Corruption(format!("expected 8 bytes, found {}", bytes.len())))?;
    Ok(u64::from_be_bytes(arr))
}
