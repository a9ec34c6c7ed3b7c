//! Snapshot and change notification surface for renderers

use crossbeam_channel::{Receiver, Sender, unbounded};
use rh_core::{Grid, SpinResult};
use serde::Serialize;

use crate::state::{RoundMessage, RoundState};

/// What changed in the machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Change {
    RoundState(RoundState),
    Grid,
    RevealedColumns(usize),
    Result,
    Message,
    Bet,
    AutoRoll,
    Balance,
}

/// Everything a renderer shows, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineSnapshot {
    pub round_state: RoundState,
    pub grid: Grid,
    pub revealed_columns: usize,
    pub last_result: Option<SpinResult>,
    pub message: Option<RoundMessage>,
    pub current_bet: f64,
    pub selected_chip: f64,
    pub chips: Vec<f64>,
    pub auto_roll_multiplier: u32,
    pub auto_roll_remaining: u32,
    pub last_win_amount: f64,
    pub balance: f64,
}

/// Notified after every state change, outside the machine's lock
pub trait RoundObserver: Send + Sync {
    fn on_change(&self, change: &Change, snapshot: &MachineSnapshot);
}

/// A change paired with the snapshot taken right after it
#[derive(Debug, Clone)]
pub struct MachineEvent {
    pub change: Change,
    pub snapshot: MachineSnapshot,
}

/// Forwards notifications into a channel
pub struct ChannelObserver {
    tx: Sender<MachineEvent>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel
    pub fn new() -> (Self, Receiver<MachineEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl RoundObserver for ChannelObserver {
    fn on_change(&self, change: &Change, snapshot: &MachineSnapshot) {
        // Receiver may be gone; nothing to do then
        let _ = self.tx.send(MachineEvent {
            change: *change,
            snapshot: snapshot.clone(),
        });
    }
}
