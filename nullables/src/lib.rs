//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the oracle engine (storage, staking, bank,
//! distribution) is abstracted behind a trait. This crate provides test-friendly
//! implementations that:
//! - Keep all state in memory behind a `Mutex`
//! - Can be inspected and controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod bank;
pub mod distribution;
pub mod staking;
pub mod store;

pub use bank::NullBank;
pub use distribution::NullDistribution;
pub use staking::{NullStaking, SlashRecord};
pub use store::NullOracleStore;
