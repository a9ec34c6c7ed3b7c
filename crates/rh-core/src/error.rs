//! Error types for the reel core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,

    #[error("Ragged grid: row {row} has {found} symbols, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid shape {rows}x{cols} does not match expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("Invalid distribution weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid paytable: {0}")]
    InvalidPaytable(String),
}

/// Result type alias
pub type CoreResult<T> = Result<T, CoreError>;
