//! Win evaluation — longest run per row

use crate::grid::Grid;
use crate::paytable::{MIN_RUN, Paytable};
use crate::spin::{SpinResult, WinLine};
use crate::symbols::Symbol;

/// Longest run of identical adjacent symbols in a row
///
/// Ties keep the run encountered first (leftmost). Returns `None` for an
/// empty row.
pub fn longest_run(row: &[Symbol]) -> Option<(Symbol, usize)> {
    let (&first, rest) = row.split_first()?;

    let mut best = (first, 1usize);
    let mut current = (first, 1usize);

    for &symbol in rest {
        if symbol == current.0 {
            current.1 += 1;
        } else {
            if current.1 > best.1 {
                best = current;
            }
            current = (symbol, 1);
        }
    }

    // Row-ending run
    if current.1 > best.1 {
        best = current;
    }

    Some(best)
}

/// Score one row; `None` unless the longest run reaches [`MIN_RUN`]
pub fn evaluate_row(
    row_index: usize,
    row: &[Symbol],
    stake: f64,
    paytable: &Paytable,
) -> Option<WinLine> {
    let (symbol, match_count) = longest_run(row)?;
    if match_count < MIN_RUN {
        return None;
    }

    let multiplier = paytable.multiplier(symbol, match_count);
    Some(WinLine {
        row_index,
        symbol,
        match_count,
        multiplier,
        win_amount: stake * multiplier,
    })
}

/// Score every row of a finished grid
pub fn evaluate(grid: &Grid, stake: f64, paytable: &Paytable) -> SpinResult {
    let win_lines = grid
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(row_index, row)| evaluate_row(row_index, row, stake, paytable))
        .collect();

    SpinResult::new(grid.clone(), stake, win_lines)
}
