//! Feedback capability (sound/haptics hook)
//!
//! The host app plugs its audio/haptic player in here; the engine only
//! announces cues.

use rh_core::WinTier;
use serde::Serialize;

/// A moment worth a sound or vibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FeedbackCue {
    /// Wager accepted, reels start
    SpinStart,
    /// A column finished revealing
    ReelStop { column: usize },
    /// Round paid out
    Win { tier: Option<WinTier>, amount: f64 },
    /// Round paid nothing
    Lose,
    /// Spin refused for lack of funds
    SpinRejected,
    /// Chip tapped
    ChipSelected { value: f64 },
    /// Auto-roll ended early for lack of funds
    AutoRollStopped,
}

/// Receives cues from the round engine
pub trait Feedback: Send + Sync {
    fn cue(&self, cue: FeedbackCue);
}

/// Silent feedback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn cue(&self, _cue: FeedbackCue) {}
}
