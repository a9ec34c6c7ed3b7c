//! Shared fixtures for the round engine integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::{Condvar, Mutex};
use rh_core::{Grid, Symbol};
use rh_round::{
    Clock, Feedback, FeedbackCue, InstantClock, Ledger, MemoryLedger, SlotConfig, SlotMachine,
    TimingConfig,
};

/// Upper bound for any wait in these tests
pub const WAIT: Duration = Duration::from_secs(5);

// ═══════════════════════════════════════════════════════════════════════════════
// MACHINES
// ═══════════════════════════════════════════════════════════════════════════════

/// Default game with instant pacing, a seeded RNG and a fresh ledger
pub fn instant_machine(balance: f64) -> (SlotMachine, Arc<MemoryLedger>, Arc<InstantClock>) {
    machine_with(SlotConfig::instant(), balance)
}

pub fn machine_with(
    config: SlotConfig,
    balance: f64,
) -> (SlotMachine, Arc<MemoryLedger>, Arc<InstantClock>) {
    let ledger = Arc::new(MemoryLedger::new(balance));
    let clock = Arc::new(InstantClock::new());
    let machine = SlotMachine::new(config, ledger.clone())
        .unwrap()
        .with_clock(clock.clone());
    machine.seed(1234);
    (machine, ledger, clock)
}

/// Timing where only the auto-roll pause takes time
pub fn pause_only_timing() -> TimingConfig {
    TimingConfig {
        auto_roll_pause_ms: 50.0,
        ..TimingConfig::instant()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// GRIDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Row 0 starts with three cherries (pays 2x); nothing else pays
pub fn cherry_three_grid() -> Grid {
    use Symbol::*;
    Grid::from_rows(vec![
        vec![Cherry, Cherry, Cherry, Lemon, Orange],
        vec![Lemon, Orange, Plum, Bell, Bar],
        vec![Bar, Bell, Plum, Orange, Lemon],
    ])
    .unwrap()
}

/// No row has a run of three
pub fn losing_grid() -> Grid {
    use Symbol::*;
    Grid::from_rows(vec![
        vec![Cherry, Lemon, Cherry, Lemon, Cherry],
        vec![Orange, Plum, Orange, Plum, Orange],
        vec![Bell, Bar, Bell, Bar, Seven],
    ])
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// GATE CLOCK
// ═══════════════════════════════════════════════════════════════════════════════

/// Clock whose sleeps block until the test opens the gate
///
/// Every sleep is announced on a channel first, so the test knows the round
/// thread is parked at a delay point.
pub struct GateClock {
    open: Mutex<bool>,
    cv: Condvar,
    entered_tx: Sender<Duration>,
    entered_rx: Receiver<Duration>,
}

impl GateClock {
    pub fn new() -> Self {
        let (entered_tx, entered_rx) = unbounded();
        Self {
            open: Mutex::new(false),
            cv: Condvar::new(),
            entered_tx,
            entered_rx,
        }
    }

    /// Release every current and future sleep
    pub fn open(&self) {
        *self.open.lock() = true;
        self.cv.notify_all();
    }

    /// Wait until some thread reaches a sleep
    pub fn wait_entered(&self) -> Duration {
        self.entered_rx
            .recv_timeout(WAIT)
            .expect("round thread never reached a delay point")
    }
}

impl Clock for GateClock {
    fn sleep(&self, duration: Duration) {
        let _ = self.entered_tx.send(duration);
        let mut open = self.open.lock();
        while !*open {
            if self.cv.wait_for(&mut open, WAIT).timed_out() {
                panic!("gate never opened");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LEDGER / FEEDBACK
// ═══════════════════════════════════════════════════════════════════════════════

/// Ledger that answers the first `allowed` funds checks with yes, then no
pub struct ScriptedFundsLedger {
    inner: MemoryLedger,
    allowed: AtomicUsize,
}

impl ScriptedFundsLedger {
    pub fn new(balance: f64, allowed: usize) -> Self {
        Self {
            inner: MemoryLedger::new(balance),
            allowed: AtomicUsize::new(allowed),
        }
    }
}

impl Ledger for ScriptedFundsLedger {
    fn balance(&self) -> f64 {
        self.inner.balance()
    }

    fn has_sufficient_funds(&self, _amount: f64) -> bool {
        self.allowed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn withdraw(&self, amount: f64, memo: &str) {
        self.inner.withdraw(amount, memo);
    }

    fn deposit(&self, amount: f64, memo: &str) {
        self.inner.deposit(amount, memo);
    }
}

/// Records every cue in order
#[derive(Default)]
pub struct RecordingFeedback {
    cues: Mutex<Vec<FeedbackCue>>,
}

impl RecordingFeedback {
    pub fn cues(&self) -> Vec<FeedbackCue> {
        self.cues.lock().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn cue(&self, cue: FeedbackCue) {
        self.cues.lock().push(cue);
    }
}
