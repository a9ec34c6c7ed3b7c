//! Error types for the round engine

use rh_core::CoreError;
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors raised by round commands
///
/// Rejected spins (busy machine, insufficient funds) are ordinary outcomes,
/// not errors; see [`crate::SpinOutcome`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoundError {
    #[error("Scripted grid rejected: {0}")]
    GridShape(#[from] CoreError),
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for round commands
pub type RoundResult<T> = Result<T, RoundError>;
