//! Clock module - injected time source for timing simulation
//!
//! Every component that reads timestamps or waits out a humanlike delay goes
//! through the [`Clock`] trait. Production code uses [`MonotonicClock`]
//! (real time, real sleeps); tests use [`ManualClock`] and advance virtual
//! time instantly while exercising the same branching logic.
//!
//! Waits are scoped and non-cancelable: `wait` returns only after the full
//! delay has elapsed on the clock, so a caller never observes a decision's
//! effect before its delay completes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source with a blocking wait
pub trait Clock: Send + Sync {
    /// Seconds elapsed since the clock's origin
    fn now(&self) -> f64;

    /// Block until `seconds` have elapsed on this clock
    ///
    /// Non-positive, NaN, and infinite durations are treated as zero.
    fn wait(&self, seconds: f64);
}

/// Real-time clock backed by [`Instant`]
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn wait(&self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }
}

/// Virtual clock for tests
///
/// Time only moves through [`ManualClock::advance`], [`ManualClock::set`],
/// or a `wait` (which advances instantly instead of sleeping). The f64
/// seconds are stored as bits in an atomic; the engine's single-writer
/// contract means no stronger synchronization is needed.
#[derive(Debug)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            bits: AtomicU64::new(0.0f64.to_bits()),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        self.set(self.now() + seconds);
    }

    /// Jump the clock to an absolute time in seconds
    pub fn set(&self, seconds: f64) {
        self.bits.store(seconds.to_bits(), Ordering::Relaxed);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn wait(&self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.advance(seconds);
        }
    }
}
