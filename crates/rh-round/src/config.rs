//! Slot machine configuration

use std::path::Path;

use rh_core::{GridSpec, Paytable, ReelDistribution, ReelGenerator, WinTierThresholds};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::timing::TimingConfig;

/// Wager limits and chip presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetConfig {
    /// Smallest accepted wager
    pub min_bet: f64,
    /// Wager selected when the machine starts
    pub default_bet: f64,
    /// Chip values offered for quick adjustment; the first is preselected
    pub chips: Vec<f64>,
}

impl Default for BetConfig {
    fn default() -> Self {
        Self {
            min_bet: 1.0,
            default_bet: 5.0,
            chips: vec![1.0, 5.0, 10.0, 25.0, 100.0],
        }
    }
}

/// Complete slot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Game name (used in ledger memos)
    pub name: String,
    /// Grid layout
    pub grid: GridSpec,
    /// Payout multipliers
    pub paytable: Paytable,
    /// Symbol draw policy
    pub distribution: ReelDistribution,
    /// Wager limits
    pub bet: BetConfig,
    /// Round pacing
    pub timing: TimingConfig,
    /// Win celebration tiers
    pub win_tiers: WinTierThresholds,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            name: "Lucky Reels".into(),
            grid: GridSpec::default(),
            paytable: Paytable::standard(),
            distribution: ReelDistribution::Uniform,
            bet: BetConfig::default(),
            timing: TimingConfig::normal(),
            win_tiers: WinTierThresholds::default(),
        }
    }
}

impl SlotConfig {
    /// Default game with zero-delay pacing
    pub fn instant() -> Self {
        Self {
            timing: TimingConfig::instant(),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "json" => Self::from_json(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        log::info!("[SlotConfig] Loaded '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Export config as pretty JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section for consistency
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }

        self.paytable.validate()?;
        // Rejects bad distribution weights
        ReelGenerator::new(self.grid, &self.distribution)?;

        let bet = &self.bet;
        if !bet.min_bet.is_finite() || bet.min_bet <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_bet must be finite and positive, got {}",
                bet.min_bet
            )));
        }
        if !bet.default_bet.is_finite() || bet.default_bet < bet.min_bet {
            return Err(ConfigError::Invalid(format!(
                "default_bet {} is below min_bet {}",
                bet.default_bet, bet.min_bet
            )));
        }
        if bet.chips.is_empty() {
            return Err(ConfigError::Invalid("at least one chip value is required".into()));
        }
        if let Some(chip) = bet.chips.iter().find(|c| !c.is_finite() || **c <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "chip values must be finite and positive, got {chip}"
            )));
        }

        self.timing.validate().map_err(ConfigError::Invalid)?;

        let tiers = &self.win_tiers;
        if !(tiers.big_win <= tiers.mega_win && tiers.mega_win <= tiers.epic_win) {
            return Err(ConfigError::Invalid(format!(
                "win tiers must be ascending, got {tiers:?}"
            )));
        }

        Ok(())
    }
}
