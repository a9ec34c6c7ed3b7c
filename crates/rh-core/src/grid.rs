//! Grid specification and the symbol matrix

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::symbols::Symbol;

/// Grid specification (rows × columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of rows (each row is scored independently)
    pub rows: usize,
    /// Number of columns (reels), revealed left to right
    pub cols: usize,
}

impl GridSpec {
    /// Standard 3×5 layout
    pub fn standard_3x5() -> Self {
        Self { rows: 3, cols: 5 }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::standard_3x5()
    }
}

/// A finished symbol matrix, stored row-major
///
/// Always rectangular with at least one row and one column. A grid is never
/// edited in place; a new one replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Symbol>>", into = "Vec<Vec<Symbol>>")]
pub struct Grid {
    rows: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Build a grid from explicit rows
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> CoreResult<Self> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(CoreError::EmptyGrid);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(CoreError::RaggedGrid {
                row,
                expected,
                found,
            });
        }
        Ok(Self { rows })
    }

    /// Rows already known to be rectangular and non-empty
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<Symbol>>) -> Self {
        debug_assert!(Self::from_rows(rows.clone()).is_ok());
        Self { rows }
    }

    /// A grid filled with a single symbol
    pub fn filled(spec: GridSpec, symbol: Symbol) -> Self {
        Self {
            rows: vec![vec![symbol; spec.cols.max(1)]; spec.rows.max(1)],
        }
    }

    pub fn rows(&self) -> &[Vec<Symbol>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Symbol]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Symbols of one column, top to bottom
    pub fn column(&self, col: usize) -> Option<Vec<Symbol>> {
        if col >= self.col_count() {
            return None;
        }
        Some(self.rows.iter().map(|r| r[col]).collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn spec(&self) -> GridSpec {
        GridSpec {
            rows: self.row_count(),
            cols: self.col_count(),
        }
    }

    /// Check the grid against an expected layout
    pub fn ensure_shape(&self, spec: GridSpec) -> CoreResult<()> {
        if self.spec() == spec {
            Ok(())
        } else {
            Err(CoreError::ShapeMismatch {
                rows: self.row_count(),
                cols: self.col_count(),
                expected_rows: spec.rows,
                expected_cols: spec.cols,
            })
        }
    }
}

impl TryFrom<Vec<Vec<Symbol>>> for Grid {
    type Error = CoreError;

    fn try_from(rows: Vec<Vec<Symbol>>) -> CoreResult<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Symbol>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let names: Vec<&str> = row.iter().map(|s| s.name()).collect();
            write!(f, "[{}]", names.join(", "))?;
        }
        Ok(())
    }
}
