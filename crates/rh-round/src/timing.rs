//! Timing profiles for round pacing

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest accepted single delay: one hour
pub const MAX_DELAY_MS: f64 = 3_600_000.0;

/// Most cosmetic regenerations a round may play
pub const MAX_CHURN_FRAMES: u32 = 1_000;

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// No waiting at all (tests, simulation)
    Instant,
    /// Hand-tuned or scaled values
    Custom,
}

impl FromStr for TimingProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "turbo" => Ok(Self::Turbo),
            "instant" => Ok(Self::Instant),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown timing profile '{other}'")),
        }
    }
}

impl fmt::Display for TimingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Turbo => "turbo",
            Self::Instant => "instant",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// Delays between the animated steps of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Cosmetic grid regenerations before the final grid lands
    pub churn_frames: u32,

    /// Delay after each cosmetic regeneration (ms)
    pub churn_interval_ms: f64,

    /// Delay after each column reveal (ms)
    pub reveal_interval_ms: f64,

    /// How long WIN/LOSE is held before returning to IDLE (ms)
    pub result_hold_ms: f64,

    /// Pause between auto-rolled rounds (ms)
    pub auto_roll_pause_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            churn_frames: 12,
            churn_interval_ms: 80.0,
            reveal_interval_ms: 250.0,
            result_hold_ms: 2000.0,
            auto_roll_pause_ms: 500.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            churn_frames: 6,
            churn_interval_ms: 50.0,
            reveal_interval_ms: 100.0,
            result_hold_ms: 800.0,
            auto_roll_pause_ms: 200.0,
        }
    }

    /// Same step count as normal, zero delay
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            churn_interval_ms: 0.0,
            reveal_interval_ms: 0.0,
            result_hold_ms: 0.0,
            auto_roll_pause_ms: 0.0,
            ..Self::normal()
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            churn_frames: self.churn_frames,
            churn_interval_ms: self.churn_interval_ms * factor,
            reveal_interval_ms: self.reveal_interval_ms * factor,
            result_hold_ms: self.result_hold_ms * factor,
            auto_roll_pause_ms: self.auto_roll_pause_ms * factor,
        }
    }

    /// Shortened schedule for rounds played from a supplied grid:
    /// no churn, every other delay halved
    pub fn scripted(&self) -> Self {
        Self {
            churn_frames: 0,
            ..self.scaled(0.5)
        }
    }

    /// All delays must be finite and within `0..=MAX_DELAY_MS`,
    /// churn capped at `MAX_CHURN_FRAMES`
    pub fn validate(&self) -> Result<(), String> {
        if self.churn_frames > MAX_CHURN_FRAMES {
            return Err(format!(
                "churn_frames must be <= {MAX_CHURN_FRAMES}, got {}",
                self.churn_frames
            ));
        }
        let delays = [
            ("churn_interval_ms", self.churn_interval_ms),
            ("reveal_interval_ms", self.reveal_interval_ms),
            ("result_hold_ms", self.result_hold_ms),
            ("auto_roll_pause_ms", self.auto_roll_pause_ms),
        ];
        for (name, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and >= 0, got {value}"));
            }
            if value > MAX_DELAY_MS {
                return Err(format!("{name} must be <= {MAX_DELAY_MS}, got {value}"));
            }
        }
        Ok(())
    }

    pub fn churn_interval(&self) -> Duration {
        millis(self.churn_interval_ms)
    }

    pub fn reveal_interval(&self) -> Duration {
        millis(self.reveal_interval_ms)
    }

    pub fn result_hold(&self) -> Duration {
        millis(self.result_hold_ms)
    }

    pub fn auto_roll_pause(&self) -> Duration {
        millis(self.auto_roll_pause_ms)
    }

    /// Total length of one round for a grid with `columns` reels (ms)
    pub fn round_duration_ms(&self, columns: usize) -> f64 {
        self.churn_frames as f64 * self.churn_interval_ms
            + columns as f64 * self.reveal_interval_ms
            + self.result_hold_ms
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

// Unvalidated values (e.g. from `scaled`) saturate at MAX_DELAY_MS
fn millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::try_from_secs_f64(ms.min(MAX_DELAY_MS) / 1000.0).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}
