//! Paytable — payout multipliers keyed by (symbol, run length)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::symbols::Symbol;

/// Shortest run that pays
pub const MIN_RUN: usize = 3;

/// Longest run with its own pay value; longer runs pay this tier
pub const MAX_PAID_RUN: usize = 5;

/// Pay values for 3, 4, 5 of a kind (index 0 = 3oak)
pub type PayValues = [f64; MAX_PAID_RUN - MIN_RUN + 1];

/// Stake multipliers for every symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paytable {
    pays: BTreeMap<Symbol, PayValues>,
}

impl Paytable {
    /// Standard table, lowest tier first
    pub fn standard() -> Self {
        let pays = [
            (Symbol::Cherry, [2.0, 5.0, 10.0]),
            (Symbol::Lemon, [3.0, 8.0, 15.0]),
            (Symbol::Orange, [4.0, 10.0, 20.0]),
            (Symbol::Plum, [5.0, 15.0, 30.0]),
            (Symbol::Bell, [10.0, 25.0, 50.0]),
            (Symbol::Bar, [20.0, 50.0, 100.0]),
            (Symbol::Seven, [50.0, 100.0, 250.0]),
        ];
        Self {
            pays: pays.into_iter().collect(),
        }
    }

    /// Build from explicit rows, validating them
    pub fn from_pays(pays: impl IntoIterator<Item = (Symbol, PayValues)>) -> CoreResult<Self> {
        let table = Self {
            pays: pays.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Every symbol must be listed with finite, positive pays
    pub fn validate(&self) -> CoreResult<()> {
        for symbol in Symbol::ALL {
            let values = self
                .pays
                .get(&symbol)
                .ok_or_else(|| CoreError::InvalidPaytable(format!("missing pays for {symbol}")))?;
            if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(CoreError::InvalidPaytable(format!(
                    "pays for {symbol} must be finite and positive, got {values:?}"
                )));
            }
        }
        Ok(())
    }

    /// Multiplier for a run of `run_length` identical symbols
    ///
    /// Runs shorter than [`MIN_RUN`] pay nothing.
    pub fn multiplier(&self, symbol: Symbol, run_length: usize) -> f64 {
        if run_length < MIN_RUN {
            return 0.0;
        }
        let idx = run_length.min(MAX_PAID_RUN) - MIN_RUN;
        self.pays
            .get(&symbol)
            .map(|values| values[idx])
            .unwrap_or(0.0)
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::standard()
    }
}
