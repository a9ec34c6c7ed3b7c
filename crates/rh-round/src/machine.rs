//! Slot Machine — the round state machine
//!
//! Owns one game's round lifecycle: admit and debit a wager, land a grid,
//! reveal it column by column, evaluate, pay out, settle, and optionally
//! chain the next round (auto-roll).
//!
//! All mutable state sits behind a single mutex. Commands take `&self`, so a
//! machine can be shared between a UI thread and the thread running rounds.
//! The lock is never held across a [`Clock`] sleep, and observers and
//! feedback are always called after the lock is released.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rh_core::{Grid, ReelGenerator, SpinResult, evaluate};

use crate::autoroll::{AutoRollState, Continuation};
use crate::bet::BetManager;
use crate::clock::{Clock, SystemClock};
use crate::config::SlotConfig;
use crate::error::{ConfigResult, RoundResult};
use crate::feedback::{Feedback, FeedbackCue, NoFeedback};
use crate::ledger::Ledger;
use crate::observer::{Change, MachineSnapshot, RoundObserver};
use crate::schedule::{self, RoundMode, RoundStep, ScheduledStep};
use crate::state::{RoundMessage, RoundState};
use crate::stats::SessionStats;

/// What a spin request came to
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    /// A round was already running; nothing happened
    Busy,
    /// The wager could not be covered; nothing was debited
    Rejected,
    /// A full round ran and settled
    Settled(SpinResult),
}

impl SpinOutcome {
    pub fn is_settled(&self) -> bool {
        matches!(self, SpinOutcome::Settled(_))
    }

    pub fn result(&self) -> Option<&SpinResult> {
        match self {
            SpinOutcome::Settled(result) => Some(result),
            _ => None,
        }
    }
}

/// Mutable engine state, guarded by `SlotMachine::state`
struct MachineState {
    round_state: RoundState,
    grid: Grid,
    revealed_columns: usize,
    last_result: Option<SpinResult>,
    message: Option<RoundMessage>,
    bet: BetManager,
    auto_roll: AutoRollState,
    last_win_amount: f64,
    stats: SessionStats,
}

/// Notifications collected under the lock and delivered after it
#[derive(Default)]
struct Effects {
    changes: Vec<Change>,
    cues: Vec<FeedbackCue>,
}

impl Effects {
    fn changed(&mut self, change: Change) {
        self.changes.push(change);
    }

    fn cue(&mut self, cue: FeedbackCue) {
        self.cues.push(cue);
    }
}

/// Result of the admission critical section
enum Admission {
    Busy,
    Cancelled,
    Rejected,
    Admitted { bet: f64 },
}

/// Slot round engine
pub struct SlotMachine {
    /// Configuration
    config: SlotConfig,
    /// Grid source for churn frames and random rounds
    generator: ReelGenerator,
    /// Player account
    ledger: Arc<dyn Ledger>,
    /// Round pacing
    clock: Arc<dyn Clock>,
    /// Sound/haptics hook
    feedback: Arc<dyn Feedback>,
    /// Random source
    rng: Mutex<Box<dyn RngCore + Send>>,
    /// Engine state
    state: Mutex<MachineState>,
    /// Change subscribers
    observers: RwLock<Vec<Arc<dyn RoundObserver>>>,
}

impl SlotMachine {
    /// Create a machine for a validated config
    ///
    /// Defaults to [`SystemClock`], [`NoFeedback`] and an OS-seeded RNG.
    pub fn new(config: SlotConfig, ledger: Arc<dyn Ledger>) -> ConfigResult<Self> {
        config.validate()?;
        let generator = ReelGenerator::new(config.grid, &config.distribution)?;

        let mut rng = StdRng::from_os_rng();
        let grid = generator.generate(&mut rng);

        log::info!(
            "[SlotMachine] '{}' ready: {}x{} grid, bet {:.2}",
            config.name,
            config.grid.rows,
            config.grid.cols,
            config.bet.default_bet
        );

        let state = MachineState {
            round_state: RoundState::Idle,
            grid,
            revealed_columns: 0,
            last_result: None,
            message: None,
            bet: BetManager::new(&config.bet),
            auto_roll: AutoRollState::default(),
            last_win_amount: 0.0,
            stats: SessionStats::default(),
        };

        Ok(Self {
            config,
            generator,
            ledger,
            clock: Arc::new(SystemClock),
            feedback: Arc::new(NoFeedback),
            rng: Mutex::new(Box::new(rng)),
            state: Mutex::new(state),
            observers: RwLock::new(Vec::new()),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn Feedback>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Replace the random source
    pub fn with_rng(self, rng: impl RngCore + Send + 'static) -> Self {
        *self.rng.lock() = Box::new(rng);
        self
    }

    /// Reseed with a deterministic `StdRng`
    pub fn seed(&self, seed: u64) {
        *self.rng.lock() = Box::new(StdRng::seed_from_u64(seed));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // OBSERVATION
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Register a change subscriber
    pub fn subscribe(&self, observer: Arc<dyn RoundObserver>) {
        self.observers.write().push(observer);
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        let state = self.state.lock();
        self.snapshot_of(&state)
    }

    pub fn round_state(&self) -> RoundState {
        self.state.lock().round_state
    }

    pub fn last_result(&self) -> Option<SpinResult> {
        self.state.lock().last_result.clone()
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn stats(&self) -> SessionStats {
        self.state.lock().stats.clone()
    }

    pub fn reset_stats(&self) {
        self.state.lock().stats = SessionStats::default();
    }

    /// Idle and the current wager is covered
    pub fn can_spin(&self) -> bool {
        let state = self.state.lock();
        state.round_state.is_idle() && self.ledger.has_sufficient_funds(state.bet.current_bet())
    }

    fn snapshot_of(&self, state: &MachineState) -> MachineSnapshot {
        MachineSnapshot {
            round_state: state.round_state,
            grid: state.grid.clone(),
            revealed_columns: state.revealed_columns,
            last_result: state.last_result.clone(),
            message: state.message.clone(),
            current_bet: state.bet.current_bet(),
            selected_chip: state.bet.selected_chip(),
            chips: state.bet.chips().to_vec(),
            auto_roll_multiplier: state.auto_roll.multiplier(),
            auto_roll_remaining: state.auto_roll.remaining(),
            last_win_amount: state.last_win_amount,
            balance: self.ledger.balance(),
        }
    }

    /// Mutate state under the lock, then notify observers and feedback
    fn apply<T>(&self, f: impl FnOnce(&mut MachineState, &mut Effects) -> T) -> T {
        let mut effects = Effects::default();
        let (out, snapshot) = {
            let mut state = self.state.lock();
            let out = f(&mut *state, &mut effects);
            let snapshot = (!effects.changes.is_empty()).then(|| self.snapshot_of(&state));
            (out, snapshot)
        };

        if let Some(snapshot) = snapshot {
            let observers = self.observers.read().clone();
            for change in &effects.changes {
                for observer in &observers {
                    observer.on_change(change, &snapshot);
                }
            }
        }
        for cue in effects.cues {
            self.feedback.cue(cue);
        }

        out
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            self.clock.sleep(duration);
        }
    }

    fn generate_grid(&self) -> Grid {
        let mut rng = self.rng.lock();
        self.generator.generate(&mut **rng)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BET COMMANDS (Idle only)
    // ═══════════════════════════════════════════════════════════════════════════

    fn adjust_bet(&self, f: impl FnOnce(&mut BetManager, f64) -> bool) -> bool {
        self.apply(|state, fx| {
            if !state.round_state.is_idle() {
                return false;
            }
            let changed = f(&mut state.bet, self.ledger.balance());
            if changed {
                fx.changed(Change::Bet);
            }
            changed
        })
    }

    /// Select a chip and bet its value
    pub fn select_chip(&self, value: f64) -> bool {
        let changed = self.adjust_bet(|bet, available| bet.select_chip(value, available));
        if changed {
            self.feedback.cue(FeedbackCue::ChipSelected { value });
        }
        changed
    }

    pub fn set_bet(&self, amount: f64) -> bool {
        self.adjust_bet(|bet, available| bet.set_bet(amount, available))
    }

    /// Add the selected chip to the wager
    pub fn increase_bet(&self) -> bool {
        self.adjust_bet(|bet, available| bet.increase(available))
    }

    /// Take the selected chip off the wager
    pub fn decrease_bet(&self) -> bool {
        self.adjust_bet(|bet, available| bet.decrease(available))
    }

    /// Bet the whole balance
    pub fn set_max_bet(&self) -> bool {
        self.adjust_bet(|bet, available| bet.set_max(available))
    }

    pub fn clear_message(&self) {
        self.apply(|state, fx| {
            if state.message.take().is_some() {
                fx.changed(Change::Message);
            }
        });
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUNDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run one round with a random grid
    ///
    /// Blocks for the round's full schedule, and for the rest of the auto-roll
    /// run if one is active.
    pub fn spin(&self) -> SpinOutcome {
        self.spin_round(None)
    }

    /// Run one round that lands on `grid`
    ///
    /// Uses the shortened scripted schedule. A grid that does not match the
    /// configured shape is refused before anything changes.
    pub fn spin_with_result(&self, grid: Grid) -> RoundResult<SpinOutcome> {
        grid.ensure_shape(self.config.grid)?;
        Ok(self.spin_round(Some(grid)))
    }

    fn spin_round(&self, scripted: Option<Grid>) -> SpinOutcome {
        let outcome = match self.admit(None) {
            Admission::Admitted { bet } => SpinOutcome::Settled(self.run_round(bet, scripted)),
            Admission::Rejected => SpinOutcome::Rejected,
            Admission::Busy | Admission::Cancelled => SpinOutcome::Busy,
        };
        if outcome.is_settled() {
            self.continue_auto_roll();
        }
        outcome
    }

    /// Idle check, funds check and debit in one critical section
    ///
    /// `epoch` is set for auto-roll continuations, which are dropped if the
    /// run was stopped during the inter-round pause.
    fn admit(&self, epoch: Option<u64>) -> Admission {
        self.apply(|state, fx| {
            if !state.round_state.is_idle() {
                log::debug!("[SlotMachine] Spin ignored: round in progress");
                return Admission::Busy;
            }
            if epoch.is_some_and(|epoch| !state.auto_roll.is_current(epoch)) {
                log::debug!("[SlotMachine] Auto-roll continuation cancelled");
                return Admission::Cancelled;
            }

            let bet = state.bet.current_bet();
            if !self.ledger.has_sufficient_funds(bet) {
                if epoch.is_some() {
                    log::warn!("[SlotMachine] Auto-roll stopped: cannot cover {bet:.2}");
                    state.auto_roll.stop();
                    state.message = Some(RoundMessage::AutoRollInsufficientFunds);
                    fx.changed(Change::AutoRoll);
                    fx.cue(FeedbackCue::AutoRollStopped);
                } else {
                    log::warn!("[SlotMachine] Spin rejected: cannot cover {bet:.2}");
                    state.message = Some(RoundMessage::InsufficientFunds { bet });
                    fx.cue(FeedbackCue::SpinRejected);
                }
                fx.changed(Change::Message);
                return Admission::Rejected;
            }

            self.ledger
                .withdraw(bet, &format!("{} wager {bet:.2}", self.config.name));
            state.round_state = RoundState::Spinning;
            state.revealed_columns = 0;
            state.last_win_amount = 0.0;

            fx.changed(Change::Balance);
            fx.changed(Change::RoundState(RoundState::Spinning));
            fx.changed(Change::RevealedColumns(0));
            fx.cue(FeedbackCue::SpinStart);

            Admission::Admitted { bet }
        })
    }

    /// Walk the round plan for an admitted wager
    fn run_round(&self, bet: f64, scripted: Option<Grid>) -> SpinResult {
        let mode = if scripted.is_some() {
            RoundMode::Scripted
        } else {
            RoundMode::Random
        };
        let steps = schedule::plan(&self.config.timing, self.config.grid.cols, mode);
        let mut scripted = scripted;
        let mut settled = None;

        for ScheduledStep { step, delay_after } in steps {
            match step {
                RoundStep::Churn { .. } => {
                    let grid = self.generate_grid();
                    self.apply(|state, fx| {
                        state.grid = grid;
                        fx.changed(Change::Grid);
                    });
                }
                RoundStep::Land => {
                    let grid = scripted.take().unwrap_or_else(|| self.generate_grid());
                    self.apply(|state, fx| {
                        state.grid = grid;
                        state.round_state = RoundState::Revealing;
                        fx.changed(Change::Grid);
                        fx.changed(Change::RoundState(RoundState::Revealing));
                    });
                }
                RoundStep::Reveal { column } => {
                    self.apply(|state, fx| {
                        state.revealed_columns = column + 1;
                        fx.changed(Change::RevealedColumns(column + 1));
                        fx.cue(FeedbackCue::ReelStop { column });
                    });
                }
                RoundStep::Settle => settled = Some(self.settle(bet)),
                RoundStep::Finish => {
                    self.apply(|state, fx| {
                        state.round_state = RoundState::Idle;
                        fx.changed(Change::RoundState(RoundState::Idle));
                    });
                }
            }
            self.pause(delay_after);
        }

        match settled {
            Some(result) => result,
            None => unreachable!("round plan always contains a settle step"),
        }
    }

    /// Evaluate the landed grid, pay out and show the result
    fn settle(&self, bet: f64) -> SpinResult {
        self.apply(|state, fx| {
            let result = evaluate(&state.grid, bet, &self.config.paytable)
                .with_win_tier(&self.config.win_tiers);
            state.stats.record(&result);

            if result.is_win {
                let amount = result.total_win;
                state.round_state = RoundState::Win;
                state.last_win_amount = amount;
                state.message = Some(RoundMessage::Won { amount });
                if amount > 0.0 {
                    self.ledger
                        .deposit(amount, &format!("{} payout {amount:.2}", self.config.name));
                }
                log::info!(
                    "[SlotMachine] Round won {amount:.2} on {bet:.2} ({} lines, {:?})",
                    result.win_lines.len(),
                    result.win_tier
                );
                fx.cue(FeedbackCue::Win {
                    tier: result.win_tier,
                    amount,
                });
            } else {
                state.round_state = RoundState::Lose;
                state.message = Some(RoundMessage::NoWin);
                log::info!("[SlotMachine] Round lost {bet:.2}");
                fx.cue(FeedbackCue::Lose);
            }

            state.last_result = Some(result.clone());
            fx.changed(Change::Result);
            fx.changed(Change::RoundState(state.round_state));
            fx.changed(Change::Message);
            if result.is_win {
                fx.changed(Change::Balance);
            }
            result
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // AUTO-ROLL
    // ═══════════════════════════════════════════════════════════════════════════

    /// Select `n` rounds per run, or deselect if `n` is already selected
    pub fn toggle_auto_roll_multiplier(&self, n: u32) -> bool {
        self.apply(|state, fx| {
            if !state.round_state.is_idle() {
                return false;
            }
            state.auto_roll.toggle(n);
            fx.changed(Change::AutoRoll);
            true
        })
    }

    /// Arm a run and play its first round
    ///
    /// Returns `None` when not idle or no multiplier is selected. Otherwise
    /// blocks until the run ends and returns the first round's outcome.
    pub fn start_auto_roll(&self) -> Option<SpinOutcome> {
        let armed = self.apply(|state, fx| {
            if !state.round_state.is_idle() {
                return false;
            }
            match state.auto_roll.arm() {
                Some(_) => {
                    log::info!(
                        "[SlotMachine] Auto-roll started: {} rounds",
                        state.auto_roll.remaining()
                    );
                    fx.changed(Change::AutoRoll);
                    true
                }
                None => false,
            }
        });
        if !armed {
            return None;
        }

        let outcome = self.spin();
        if !outcome.is_settled() {
            self.apply(|state, fx| {
                if state.auto_roll.is_active() {
                    state.auto_roll.disarm();
                    fx.changed(Change::AutoRoll);
                }
            });
        }
        Some(outcome)
    }

    /// Clear the run; a round already in flight still completes
    pub fn stop_auto_roll(&self) {
        self.apply(|state, fx| {
            let was_active = state.auto_roll.multiplier() > 0 || state.auto_roll.is_active();
            state.auto_roll.stop();
            if was_active {
                log::info!("[SlotMachine] Auto-roll stopped");
                fx.changed(Change::AutoRoll);
            }
        });
    }

    /// Chain rounds while the run lasts
    fn continue_auto_roll(&self) {
        loop {
            let next = self.apply(|state, fx| {
                let bet = state.bet.current_bet();
                let next = state
                    .auto_roll
                    .advance(|| self.ledger.has_sufficient_funds(bet));
                match next {
                    Continuation::Idle => {}
                    Continuation::Continue { .. } => fx.changed(Change::AutoRoll),
                    Continuation::Finished => {
                        log::info!("[SlotMachine] Auto-roll finished");
                        fx.changed(Change::AutoRoll);
                    }
                    Continuation::OutOfFunds => {
                        log::warn!("[SlotMachine] Auto-roll stopped: cannot cover {bet:.2}");
                        state.message = Some(RoundMessage::AutoRollInsufficientFunds);
                        fx.changed(Change::AutoRoll);
                        fx.changed(Change::Message);
                        fx.cue(FeedbackCue::AutoRollStopped);
                    }
                }
                next
            });

            let Continuation::Continue { epoch } = next else {
                return;
            };

            self.pause(self.config.timing.auto_roll_pause());

            match self.admit(Some(epoch)) {
                Admission::Admitted { bet } => {
                    self.run_round(bet, None);
                }
                // A manual spin took over, or the run was stopped or ran dry
                Admission::Busy | Admission::Cancelled | Admission::Rejected => return,
            }
        }
    }
}
