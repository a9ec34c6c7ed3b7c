//! Round step plan
//!
//! A round is a fixed list of steps, each followed by a delay. The machine
//! walks the list and sleeps on its [`Clock`](crate::Clock) between steps, so
//! pacing is data and tests can compress it to nothing.

use std::time::Duration;

use crate::timing::TimingConfig;

/// Where the final grid comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// Drawn from the reel generator
    Random,
    /// Supplied by the caller; shortened schedule
    Scripted,
}

/// One step of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStep {
    /// Cosmetic grid regeneration (no gameplay effect)
    Churn { frame: u32 },
    /// Store the authoritative grid and start revealing
    Land,
    /// Column `column` is now visible (revealed count = column + 1)
    Reveal { column: usize },
    /// Evaluate, pay out, show the result
    Settle,
    /// Back to idle
    Finish,
}

/// A step and the pause that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub step: RoundStep,
    pub delay_after: Duration,
}

impl ScheduledStep {
    fn new(step: RoundStep, delay_after: Duration) -> Self {
        Self { step, delay_after }
    }
}

/// Build the step list for one round
pub fn plan(timing: &TimingConfig, columns: usize, mode: RoundMode) -> Vec<ScheduledStep> {
    let timing = match mode {
        RoundMode::Random => timing.clone(),
        RoundMode::Scripted => timing.scripted(),
    };

    let mut steps = Vec::with_capacity(timing.churn_frames as usize + columns + 3);

    for frame in 0..timing.churn_frames {
        steps.push(ScheduledStep::new(
            RoundStep::Churn { frame },
            timing.churn_interval(),
        ));
    }

    steps.push(ScheduledStep::new(RoundStep::Land, Duration::ZERO));

    for column in 0..columns {
        steps.push(ScheduledStep::new(
            RoundStep::Reveal { column },
            timing.reveal_interval(),
        ));
    }

    steps.push(ScheduledStep::new(RoundStep::Settle, timing.result_hold()));
    steps.push(ScheduledStep::new(RoundStep::Finish, Duration::ZERO));

    steps
}

/// Sum of all delays in a plan
pub fn total_duration(steps: &[ScheduledStep]) -> Duration {
    steps.iter().map(|s| s.delay_after).sum()
}
