//! Bet manager — current wager and chip selection

use serde::Serialize;

use crate::config::BetConfig;

/// Tracks the wager and keeps it within `[min_bet, max(min_bet, available)]`
///
/// Every command clamps silently and reports whether anything changed; the
/// round-state guard lives in the machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetManager {
    current_bet: f64,
    selected_chip: f64,
    min_bet: f64,
    chips: Vec<f64>,
}

impl BetManager {
    pub fn new(config: &BetConfig) -> Self {
        let min_bet = config.min_bet;
        Self {
            current_bet: config.default_bet.max(min_bet),
            selected_chip: config.chips.first().copied().unwrap_or(min_bet),
            min_bet,
            chips: config.chips.clone(),
        }
    }

    pub fn current_bet(&self) -> f64 {
        self.current_bet
    }

    pub fn selected_chip(&self) -> f64 {
        self.selected_chip
    }

    pub fn min_bet(&self) -> f64 {
        self.min_bet
    }

    pub fn chips(&self) -> &[f64] {
        &self.chips
    }

    /// Largest wager allowed for the given balance
    pub fn max_bet(&self, available: f64) -> f64 {
        self.min_bet.max(available)
    }

    fn clamp(&self, amount: f64, available: f64) -> f64 {
        if amount.is_nan() {
            return self.min_bet;
        }
        amount.clamp(self.min_bet, self.max_bet(available))
    }

    fn replace_bet(&mut self, bet: f64) -> bool {
        if bet == self.current_bet {
            return false;
        }
        self.current_bet = bet;
        true
    }

    /// Set the wager, clamped into bounds
    pub fn set_bet(&mut self, amount: f64, available: f64) -> bool {
        let bet = self.clamp(amount, available);
        self.replace_bet(bet)
    }

    /// Select a chip and use its value as the wager
    pub fn select_chip(&mut self, value: f64, available: f64) -> bool {
        if !value.is_finite() || value <= 0.0 {
            return false;
        }
        let chip_changed = self.selected_chip != value;
        self.selected_chip = value;
        let bet_changed = self.set_bet(value, available);
        chip_changed || bet_changed
    }

    pub fn increase(&mut self, available: f64) -> bool {
        self.set_bet(self.current_bet + self.selected_chip, available)
    }

    pub fn decrease(&mut self, available: f64) -> bool {
        self.set_bet(self.current_bet - self.selected_chip, available)
    }

    /// Bet the whole balance, if it covers the minimum
    pub fn set_max(&mut self, available: f64) -> bool {
        if !available.is_finite() || available < self.min_bet {
            return false;
        }
        self.replace_bet(available)
    }
}
