//! Per-cycle strategy state

use serde::{Deserialize, Serialize};

/// One-shot gate with exactly two states: open until tripped, then closed
/// until the next reset
///
/// Tripping is idempotent; only an interval boundary reopens the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latch {
    tripped: bool,
}

impl Latch {
    pub fn is_open(&self) -> bool {
        !self.tripped
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    pub fn trip(&mut self) {
        self.tripped = true;
    }

    pub fn reset(&mut self) {
        self.tripped = false;
    }
}

/// Mutable strategy state scoped to the current bar interval
///
/// Owned by the controller, passed into each evaluation step, and reset as
/// a unit when a new interval begins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleState {
    /// Trips once an entry has been submitted this cycle
    pub entry_latch: Latch,

    /// Trips once a take-profit exit has been requested this cycle
    pub exit_latch: Latch,

    /// Stop price attached to the most recent long entry
    pub stop_long_price: f64,

    /// Stop price attached to the most recent short entry
    pub stop_short_price: f64,
}

impl CycleState {
    /// Interval-boundary reset: reopen both latches. Stop prices persist
    /// since they describe protective orders already resting with the host.
    pub fn begin_cycle(&mut self) {
        self.entry_latch.reset();
        self.exit_latch.reset();
    }
}
