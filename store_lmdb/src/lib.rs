//! LMDB storage backend for the Augury price oracle.
//!
//! Implements every storage trait from `augury-store` using the `heed` LMDB bindings.
//! Each collection maps to its own named database inside a single environment. Keys
//! are raw address bytes, pair strings, or big-endian integers, so LMDB's byte-wise
//! key order is the iteration order callers see. Values are `bincode`-encoded.

pub mod delegation;
pub mod environment;
pub mod error;
pub mod exchange_rate;
pub mod miss_counter;
pub mod params;
pub mod reward;
pub mod snapshot;
pub mod store;
pub mod votes;
pub mod whitelist;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use store::LmdbOracleStore;
