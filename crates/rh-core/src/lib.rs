//! # rh-core — Reel math for the slot round engine
//!
//! Pure, stateless building blocks of a round outcome:
//!
//! - **Symbols**: the seven reel tokens
//! - **Grid**: the rows × columns symbol matrix of one round
//! - **Paytable**: stake multiplier per (symbol, run length)
//! - **Reels**: grid generation from an injected random source
//! - **Evaluator**: longest-run-per-row scoring into a [`SpinResult`]
//!
//! ## Architecture
//!
//! ```text
//! ReelGenerator ──> Grid ──> evaluate(grid, stake, Paytable)
//!                                  │
//!                                  v
//!                     SpinResult { win_lines, total_win, is_win }
//! ```

pub mod error;
pub mod evaluator;
pub mod grid;
pub mod paytable;
pub mod reels;
pub mod spin;
pub mod symbols;

pub use error::*;
pub use evaluator::*;
pub use grid::*;
pub use paytable::*;
pub use reels::*;
pub use spin::*;
pub use symbols::*;
