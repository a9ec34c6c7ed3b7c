//! Round state and user-facing messages

use std::fmt;

use serde::Serialize;

/// Phase of the single round a machine can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum RoundState {
    /// Waiting for a spin; the only state that accepts commands
    #[default]
    Idle,
    /// Wager taken, cosmetic reels churning
    Spinning,
    /// Final grid landed, columns revealing left to right
    Revealing,
    /// Result shown: paid
    Win,
    /// Result shown: nothing paid
    Lose,
}

impl RoundState {
    pub fn is_idle(self) -> bool {
        self == RoundState::Idle
    }

    /// Win or Lose
    pub fn is_result(self) -> bool {
        matches!(self, RoundState::Win | RoundState::Lose)
    }
}

/// Message shown to the player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RoundMessage {
    /// Spin refused: the wager exceeds the balance
    InsufficientFunds { bet: f64 },
    /// Round paid out
    Won { amount: f64 },
    /// Round paid nothing
    NoWin,
    /// Auto-roll ended because the next wager could not be covered
    AutoRollInsufficientFunds,
}

impl fmt::Display for RoundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundMessage::InsufficientFunds { bet } => {
                write!(f, "Insufficient funds for a {bet:.2} bet")
            }
            RoundMessage::Won { amount } => write!(f, "You won {amount:.2}!"),
            RoundMessage::NoWin => f.write_str("No win this time"),
            RoundMessage::AutoRollInsufficientFunds => {
                f.write_str("Auto-roll stopped: insufficient funds")
            }
        }
    }
}
