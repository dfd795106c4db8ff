//! Shared utilities for the Augury price oracle.

pub mod logging;
pub mod period;

pub use logging::{init_logging, LogFormat};
pub use period::{is_period_last_block, period_index};
