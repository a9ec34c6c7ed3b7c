//! Spin result and win classification

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::symbols::Symbol;

/// A scored winning run within one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinLine {
    /// Row the run was found in
    pub row_index: usize,
    /// Winning symbol
    pub symbol: Symbol,
    /// Length of the run
    pub match_count: usize,
    /// Paytable multiplier applied to the stake
    pub multiplier: f64,
    /// Win amount (stake × multiplier)
    pub win_amount: f64,
}

/// Win size relative to the stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WinTier {
    Win,
    BigWin,
    MegaWin,
    EpicWin,
}

/// Minimum win-to-stake ratios for each celebration tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinTierThresholds {
    pub big_win: f64,
    pub mega_win: f64,
    pub epic_win: f64,
}

impl Default for WinTierThresholds {
    fn default() -> Self {
        Self {
            big_win: 15.0,
            mega_win: 25.0,
            epic_win: 50.0,
        }
    }
}

impl WinTierThresholds {
    /// Classify a win ratio; `None` for no win
    pub fn classify(&self, win_ratio: f64) -> Option<WinTier> {
        if win_ratio <= 0.0 || !win_ratio.is_finite() {
            None
        } else if win_ratio >= self.epic_win {
            Some(WinTier::EpicWin)
        } else if win_ratio >= self.mega_win {
            Some(WinTier::MegaWin)
        } else if win_ratio >= self.big_win {
            Some(WinTier::BigWin)
        } else {
            Some(WinTier::Win)
        }
    }
}

/// Complete outcome of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    /// Final grid
    pub grid: Grid,
    /// Wagered amount
    pub stake: f64,
    /// Win lines ordered by row index
    pub win_lines: Vec<WinLine>,
    /// Sum of all win line amounts
    pub total_win: f64,
    /// True if at least one win line exists
    pub is_win: bool,
    /// Tier of the win (if any)
    pub win_tier: Option<WinTier>,
}

impl SpinResult {
    /// Assemble a result from scored lines
    pub fn new(grid: Grid, stake: f64, win_lines: Vec<WinLine>) -> Self {
        let total_win = win_lines.iter().map(|w| w.win_amount).sum();
        let is_win = !win_lines.is_empty();
        Self {
            grid,
            stake,
            win_lines,
            total_win,
            is_win,
            win_tier: None,
        }
    }

    /// Attach the win tier
    pub fn with_win_tier(mut self, thresholds: &WinTierThresholds) -> Self {
        self.win_tier = if self.is_win {
            thresholds.classify(self.win_ratio())
        } else {
            None
        };
        self
    }

    /// Win-to-stake ratio
    pub fn win_ratio(&self) -> f64 {
        if self.stake > 0.0 {
            self.total_win / self.stake
        } else {
            0.0
        }
    }

    /// Win line for a row, if that row paid
    pub fn line_for_row(&self, row_index: usize) -> Option<&WinLine> {
        self.win_lines.iter().find(|w| w.row_index == row_index)
    }
}
