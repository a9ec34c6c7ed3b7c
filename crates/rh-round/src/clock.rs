//! Injectable clock for round pacing

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Suspends the round task between animated steps
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Wall-clock pacing (blocks the calling thread)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Never waits; accumulates the virtual time that would have passed
#[derive(Debug, Default)]
pub struct InstantClock {
    elapsed_nanos: AtomicU64,
    sleeps: AtomicU64,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time slept
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::Relaxed))
    }

    /// Number of sleep calls
    pub fn sleep_count(&self) -> u64 {
        self.sleeps.load(Ordering::Relaxed)
    }
}

impl Clock for InstantClock {
    fn sleep(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.sleeps.fetch_add(1, Ordering::Relaxed);
    }
}
