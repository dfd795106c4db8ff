//! Per-block execution context.

use crate::events::OracleEvent;

/// Height, time and event buffer of the block being processed.
///
/// The host creates one per block, passes it to every message handler and to the
/// end-block hook, then drains the events.
#[derive(Clone, Debug, Default)]
pub struct BlockContext {
    height: u64,
    time_ms: u64,
    events: Vec<OracleEvent>,
}

impl BlockContext {
    pub fn new(height: u64, time_ms: u64) -> Self {
        Self {
            height,
            time_ms,
            events: Vec::new(),
        }
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    /// Block time in milliseconds since the Unix epoch.
    pub fn time_ms(&self) -> u64 {
        self.time_ms
    }

    pub fn emit(&mut self, event: OracleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[OracleEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<OracleEvent> {
        std::mem::take(&mut self.events)
    }
}
