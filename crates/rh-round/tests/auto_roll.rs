//! Auto-Roll Integration Tests
//!
//! Tests for:
//! - Multiplier toggle semantics
//! - Exact round counts
//! - Funds exhaustion mid-run
//! - Cancellation during a round and during the inter-round pause

mod common;

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use common::*;
use rh_round::{
    EntryKind, FeedbackCue, MemoryLedger, RoundMessage, RoundState, SlotConfig, SlotMachine,
    SpinOutcome,
};

// ═══════════════════════════════════════════════════════════════════════════════
// TOGGLE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_toggle_multiplier() {
    let (machine, _ledger, _clock) = instant_machine(100.0);

    assert!(machine.toggle_auto_roll_multiplier(10));
    assert_eq!(machine.snapshot().auto_roll_multiplier, 10);

    assert!(machine.toggle_auto_roll_multiplier(25));
    assert_eq!(machine.snapshot().auto_roll_multiplier, 25);

    assert!(machine.toggle_auto_roll_multiplier(25));
    assert_eq!(machine.snapshot().auto_roll_multiplier, 0);
    assert_eq!(machine.snapshot().auto_roll_remaining, 0);
}

#[test]
fn test_start_without_multiplier_is_noop() {
    let (machine, ledger, _clock) = instant_machine(100.0);

    assert_eq!(machine.start_auto_roll(), None);
    assert_eq!(machine.stats().total_spins, 0);
    assert!(ledger.journal().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// RUNS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_runs_exactly_n_rounds() {
    for n in [1, 2, 5, 10] {
        let (machine, ledger, _clock) = instant_machine(10_000.0);
        machine.toggle_auto_roll_multiplier(n);

        let first = machine.start_auto_roll().unwrap();
        assert!(first.is_settled());

        let stats = machine.stats();
        assert_eq!(stats.total_spins, n as u64);
        assert_eq!(ledger.count(EntryKind::Withdrawal), n as usize);
        assert_relative_eq!(
            machine.balance(),
            10_000.0 - stats.total_bet + stats.total_win,
            epsilon = 1e-9
        );

        let snap = machine.snapshot();
        assert_eq!(snap.round_state, RoundState::Idle);
        assert_eq!(snap.auto_roll_remaining, 0);
        assert_eq!(snap.auto_roll_multiplier, 0);
    }
}

#[test]
fn test_pause_between_rounds() {
    let config = SlotConfig {
        timing: pause_only_timing(),
        ..SlotConfig::default()
    };
    let (machine, _ledger, clock) = machine_with(config, 1000.0);
    machine.toggle_auto_roll_multiplier(4);
    machine.start_auto_roll();

    assert_eq!(machine.stats().total_spins, 4);
    // Three pauses between four rounds
    assert_eq!(clock.sleep_count(), 3);
}

#[test]
fn test_funds_exhaustion_stops_run() {
    // Round 1 admission, continuation check, round 2 admission; the fourth
    // check fails
    let ledger = Arc::new(ScriptedFundsLedger::new(1000.0, 3));
    let feedback = Arc::new(RecordingFeedback::default());
    let machine = SlotMachine::new(SlotConfig::instant(), ledger.clone())
        .unwrap()
        .with_clock(Arc::new(rh_round::InstantClock::new()))
        .with_feedback(feedback.clone());

    machine.toggle_auto_roll_multiplier(10);
    machine.start_auto_roll();

    assert_eq!(machine.stats().total_spins, 2);
    let snap = machine.snapshot();
    assert_eq!(snap.message, Some(RoundMessage::AutoRollInsufficientFunds));
    assert_eq!(snap.auto_roll_remaining, 0);
    assert_eq!(snap.auto_roll_multiplier, 0);
    assert_eq!(snap.round_state, RoundState::Idle);
    assert!(feedback.cues().contains(&FeedbackCue::AutoRollStopped));
}

#[test]
fn test_real_balance_runs_dry() {
    // Two columns can never hold a run of three, so every round loses
    let config = SlotConfig {
        grid: rh_core::GridSpec { rows: 3, cols: 2 },
        ..SlotConfig::instant()
    };
    let (machine, ledger, _clock) = machine_with(config, 12.0);
    machine.toggle_auto_roll_multiplier(100);
    machine.start_auto_roll();

    assert_eq!(machine.stats().total_spins, 2);
    assert_relative_eq!(machine.balance(), 2.0);
    assert_eq!(ledger.count(EntryKind::Withdrawal), 2);
    assert_eq!(
        machine.snapshot().message,
        Some(RoundMessage::AutoRollInsufficientFunds)
    );
}

#[test]
fn test_first_spin_rejected_clears_run() {
    let (machine, _ledger, _clock) = instant_machine(2.0);
    machine.toggle_auto_roll_multiplier(5);

    assert_eq!(machine.start_auto_roll(), Some(SpinOutcome::Rejected));
    let snap = machine.snapshot();
    assert_eq!(snap.auto_roll_remaining, 0);
    assert_eq!(snap.message, Some(RoundMessage::InsufficientFunds { bet: 5.0 }));
    assert_eq!(machine.stats().total_spins, 0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CANCELLATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_stop_during_round_finishes_that_round() {
    let ledger = Arc::new(MemoryLedger::new(1000.0));
    let clock = Arc::new(GateClock::new());
    let machine = SlotMachine::new(SlotConfig::default(), ledger.clone())
        .unwrap()
        .with_clock(clock.clone());
    machine.toggle_auto_roll_multiplier(5);

    thread::scope(|s| {
        let run = s.spawn(|| machine.start_auto_roll());

        clock.wait_entered();
        assert_eq!(machine.snapshot().round_state, RoundState::Spinning);
        assert_eq!(machine.snapshot().auto_roll_remaining, 5);

        machine.stop_auto_roll();
        let snap = machine.snapshot();
        assert_eq!(snap.auto_roll_remaining, 0);
        assert_eq!(snap.auto_roll_multiplier, 0);

        clock.open();
        let first = run.join().unwrap();
        assert!(first.is_some_and(|o| o.is_settled()));
    });

    assert_eq!(machine.stats().total_spins, 1);
    assert_eq!(ledger.count(EntryKind::Withdrawal), 1);
    assert_eq!(machine.round_state(), RoundState::Idle);
}

#[test]
fn test_stop_during_pause_cancels_next_round() {
    let ledger = Arc::new(MemoryLedger::new(1000.0));
    let clock = Arc::new(GateClock::new());
    let config = SlotConfig {
        timing: pause_only_timing(),
        ..SlotConfig::default()
    };
    let machine = SlotMachine::new(config, ledger.clone())
        .unwrap()
        .with_clock(clock.clone());
    machine.toggle_auto_roll_multiplier(5);

    thread::scope(|s| {
        let run = s.spawn(|| machine.start_auto_roll());

        // The only non-zero delay is the pause after round one
        clock.wait_entered();
        let snap = machine.snapshot();
        assert_eq!(snap.round_state, RoundState::Idle);
        assert_eq!(snap.auto_roll_remaining, 4);

        machine.stop_auto_roll();
        clock.open();
        run.join().unwrap();
    });

    assert_eq!(machine.stats().total_spins, 1);
    assert_eq!(ledger.count(EntryKind::Withdrawal), 1);
    assert_eq!(machine.snapshot().auto_roll_multiplier, 0);
}

#[test]
fn test_toggle_during_pause_ends_run() {
    let ledger = Arc::new(MemoryLedger::new(1000.0));
    let clock = Arc::new(GateClock::new());
    let config = SlotConfig {
        timing: pause_only_timing(),
        ..SlotConfig::default()
    };
    let machine = SlotMachine::new(config, ledger)
        .unwrap()
        .with_clock(clock.clone());
    machine.toggle_auto_roll_multiplier(3);

    thread::scope(|s| {
        let run = s.spawn(|| machine.start_auto_roll());

        clock.wait_entered();
        // Idle during the pause, so toggling is accepted and ends the run
        assert!(machine.toggle_auto_roll_multiplier(10));
        assert_eq!(machine.snapshot().auto_roll_remaining, 0);
        assert_eq!(machine.snapshot().auto_roll_multiplier, 10);

        clock.open();
        run.join().unwrap();
    });

    assert_eq!(machine.stats().total_spins, 1);
    assert_eq!(machine.snapshot().auto_roll_multiplier, 10);
}
