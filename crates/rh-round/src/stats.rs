//! Session statistics

use rh_core::{SpinResult, WinTier};
use serde::Serialize;

/// Running totals over every settled round
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    /// Rounds that reached BigWin or above
    pub big_wins: u64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    pub fn record(&mut self, result: &SpinResult) {
        self.total_spins += 1;
        self.total_bet += result.stake;
        self.total_win += result.total_win;

        if result.is_win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        if matches!(
            result.win_tier,
            Some(WinTier::BigWin | WinTier::MegaWin | WinTier::EpicWin)
        ) {
            self.big_wins += 1;
        }

        self.max_win_ratio = self.max_win_ratio.max(result.win_ratio());
    }

    /// Return to player, in percent
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            self.total_win / self.total_bet * 100.0
        } else {
            0.0
        }
    }

    /// Share of winning rounds, in percent
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            self.wins as f64 / self.total_spins as f64 * 100.0
        } else {
            0.0
        }
    }
}
