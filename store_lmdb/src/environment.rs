//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::store::{LmdbOracleStore, OracleDatabases};
use crate::LmdbError;

/// Number of named databases the oracle uses.
pub const ORACLE_DB_COUNT: u32 = 9;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    dbs: OracleDatabases,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in the directory `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Io(e.to_string()))?;

        let mut options = EnvOpenOptions::new();
        options.map_size(map_size).max_dbs(ORACLE_DB_COUNT);
        // SAFETY: each environment directory is opened once per process; callers
        // share the returned handle instead of reopening the path.
        let env = unsafe { options.open(path) }?;

        let mut wtxn = env.write_txn()?;
        let mut create = |name: &str| -> Result<Database<Bytes, Bytes>, LmdbError> {
            Ok(env.create_database(&mut wtxn, Some(name))?)
        };
        let dbs = OracleDatabases {
            meta: create("meta")?,
            exchange_rates: create("exchange_rates")?,
            snapshots: create("price_snapshots")?,
            prevotes: create("prevotes")?,
            votes: create("votes")?,
            delegations: create("feeder_delegations")?,
            miss_counters: create("miss_counters")?,
            whitelist: create("whitelist")?,
            reward_pools: create("reward_pools")?,
        };
        wtxn.commit()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env: Arc::new(env),
            dbs,
        })
    }

    /// A store handle sharing this environment.
    pub fn oracle_store(&self) -> LmdbOracleStore {
        LmdbOracleStore {
            env: Arc::clone(&self.env),
            dbs: self.dbs,
        }
    }
}
