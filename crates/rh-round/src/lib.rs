//! # rh-round — Slot round engine
//!
//! Drives one game's rounds on top of the pure reel math in `rh-core`:
//!
//! - **Bet**: wager and chip selection, clamped to the balance
//! - **Machine**: the round state machine (admit, churn, land, reveal, settle)
//! - **Schedule**: a round as an explicit list of steps and delays
//! - **Auto-roll**: chained rounds with epoch-based cancellation
//! - **Ledger / Clock / Feedback**: host-provided capabilities
//! - **Observer**: snapshots and change notifications for renderers
//!
//! ## Round lifecycle
//!
//! ```text
//! Idle ──spin()──> Spinning ──churn──> Revealing ──reveal 1..=COLS──> Win | Lose
//!   ^                                                                     │
//!   └──────────────────────────── hold ──────────────────────────────────┘
//!                                   │
//!                                   └──> auto-roll continuation
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rh_round::{InstantClock, MemoryLedger, SlotConfig, SlotMachine};
//!
//! let ledger = Arc::new(MemoryLedger::new(100.0));
//! let machine = SlotMachine::new(SlotConfig::instant(), ledger)
//!     .unwrap()
//!     .with_clock(Arc::new(InstantClock::new()));
//!
//! machine.seed(7);
//! let outcome = machine.spin();
//! assert!(outcome.is_settled());
//! ```

pub mod autoroll;
pub mod bet;
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod ledger;
pub mod machine;
pub mod observer;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod timing;

pub use autoroll::*;
pub use bet::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use feedback::*;
pub use ledger::*;
pub use machine::*;
pub use observer::*;
pub use schedule::*;
pub use state::*;
pub use stats::*;
pub use timing::*;
