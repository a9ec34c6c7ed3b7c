//! Auto-roll bookkeeping
//!
//! Chains N rounds. Every change that ends a run bumps `epoch`; a continuation
//! captures the epoch before its inter-round pause and only spins if the epoch
//! is unchanged afterwards, so a stop issued during the pause is honoured.

use serde::Serialize;

/// What to do after a round settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// No run active
    Idle,
    /// Pause, then spin again if `epoch` is still current
    Continue { epoch: u64 },
    /// All requested rounds played
    Finished,
    /// Next wager cannot be covered; run cleared
    OutOfFunds,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutoRollState {
    /// Rounds per run; 0 = disabled
    multiplier: u32,
    /// Rounds left in the active run, including the one in flight
    remaining: u32,
    /// Cancellation generation
    epoch: u64,
}

impl AutoRollState {
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Select `n`, or deselect when `n` is already selected. Always clears the
    /// active run.
    pub fn toggle(&mut self, n: u32) {
        self.multiplier = if self.multiplier == n { 0 } else { n };
        if self.remaining > 0 {
            self.remaining = 0;
            self.epoch += 1;
        }
    }

    /// Start a run of `multiplier` rounds
    pub fn arm(&mut self) -> Option<u64> {
        if self.multiplier == 0 {
            return None;
        }
        self.remaining = self.multiplier;
        Some(self.epoch)
    }

    /// Drop the active run without touching the multiplier
    pub fn disarm(&mut self) {
        self.remaining = 0;
    }

    /// Clear everything and invalidate pending continuations
    pub fn stop(&mut self) {
        self.multiplier = 0;
        self.remaining = 0;
        self.epoch += 1;
    }

    /// Whether a continuation captured at `epoch` may still spin
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch && self.remaining > 0
    }

    /// Account for a settled round and decide the next step
    pub fn advance(&mut self, funds_ok: impl FnOnce() -> bool) -> Continuation {
        if self.remaining == 0 {
            return Continuation::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.multiplier = 0;
            return Continuation::Finished;
        }
        if !funds_ok() {
            self.stop();
            return Continuation::OutOfFunds;
        }
        Continuation::Continue { epoch: self.epoch }
    }
}
