//! Timing module - humanlike delay generation
//!
//! [`ActionTimingSimulator`] produces the delay for each simulated input
//! action. Base delays are drawn from a right-skewed Beta(2, 5) mapped into
//! the action's range (humans respond fast more often than slow), with a
//! small Gaussian jitter. When the recent cadence looks self-similar the
//! sample is deliberately perturbed outside its usual range to break the
//! rhythm.
//!
//! [`OperationPacer`] paces whole game operations (select, discard, claim):
//! it draws a Gaussian delay around the operation's typical think-time and
//! waits it out on the injected clock before the caller proceeds.
//!
//! Both samplers own a seedable RNG so a fixed seed reproduces an entire
//! session's timing.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Normal};
use tracing::{debug, trace};

use mahjong_pilot_types::{GameOp, TimedAction, ACTION_HISTORY_CAP};

use crate::clock::Clock;
use crate::history::{ActionRecord, History};
use crate::pattern::PatternDetector;

/// Beta shape favoring the low end of the delay range
const BETA_ALPHA: f64 = 2.0;
const BETA_BETA: f64 = 5.0;

/// Standard deviation of the additive delay jitter, in seconds
const JITTER_SIGMA: f64 = 0.05;

/// Pattern-break scale factor ranges (up / down)
const BREAK_UP: (f64, f64) = (1.2, 1.5);
const BREAK_DOWN: (f64, f64) = (0.7, 0.9);

/// Standard deviation of the pacer's think-time spread, in seconds
const PACE_SIGMA: f64 = 0.2;

/// Per-action delay generator with cadence-aware pattern breaking
pub struct ActionTimingSimulator {
    rng: StdRng,
    clock: Arc<dyn Clock>,
    detector: PatternDetector,
    history: History<ActionRecord, ACTION_HISTORY_CAP>,
    base: Beta<f64>,
    jitter: Normal<f64>,
}

impl ActionTimingSimulator {
    pub fn new(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock,
            detector: PatternDetector::new(),
            history: History::new(),
            base: Beta::new(BETA_ALPHA, BETA_BETA).expect("fixed beta shape is valid"),
            jitter: Normal::new(0.0, JITTER_SIGMA).expect("fixed jitter sigma is valid"),
        }
    }

    /// Produce a delay in seconds for one action and record it
    ///
    /// The natural sample stays inside the action's base range. If the
    /// existing history already reads as self-similar, the sample is scaled
    /// out of range instead - the excursion is the point.
    pub fn delay(&mut self, action: TimedAction) -> f64 {
        let (min, max) = action.delay_range();
        let mut delay = self.natural_delay(min, max);

        if self.detector.detect(self.history.as_slice()) {
            delay = self.break_pattern(delay);
        }

        self.history.push(ActionRecord {
            action,
            delay,
            timestamp: self.clock.now(),
        });

        delay
    }

    /// Recorded timing samples, oldest first
    pub fn history(&self) -> &[ActionRecord] {
        self.history.as_slice()
    }

    /// Right-skewed sample in `[min, max]`
    fn natural_delay(&mut self, min: f64, max: f64) -> f64 {
        let raw = self.base.sample(&mut self.rng);
        let delay = min + raw * (max - min);
        let noise = self.jitter.sample(&mut self.rng);
        (delay + noise).clamp(min, max)
    }

    /// Scale a delay out of its usual range to break a detected rhythm
    fn break_pattern(&mut self, delay: f64) -> f64 {
        let factor = if self.rng.random_bool(0.5) {
            self.rng.random_range(BREAK_UP.0..BREAK_UP.1)
        } else {
            self.rng.random_range(BREAK_DOWN.0..BREAK_DOWN.1)
        };
        let perturbed = delay * factor;
        debug!(delay, perturbed, "recent cadence self-similar, breaking pattern");
        perturbed
    }
}

/// Game-operation pacer with per-operation think-time profiles
///
/// Unlike [`ActionTimingSimulator`], the pacer waits the delay out itself:
/// `pace` returns only after the full delay has elapsed on the clock.
pub struct OperationPacer {
    rng: StdRng,
    clock: Arc<dyn Clock>,
    noise: Normal<f64>,
    last_op: HashMap<GameOp, f64>,
}

impl OperationPacer {
    pub fn new(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock,
            noise: Normal::new(0.0, PACE_SIGMA).expect("fixed pace sigma is valid"),
            last_op: HashMap::new(),
        }
    }

    /// Wait out a humanlike pause for `op`; returns the waited seconds
    ///
    /// Rapid-fire repeats of the same operation fall back to the profile
    /// mean instead of sampling: a burst of identical near-instant repeats
    /// reads as scripted.
    pub fn pace(&mut self, op: GameOp) -> f64 {
        let profile = op.pace_profile();

        let rushed = self
            .last_op
            .get(&op)
            .is_some_and(|&t| self.clock.now() - t < profile.min);
        let base = if rushed {
            profile.mean
        } else {
            profile.mean + self.noise.sample(&mut self.rng)
        };

        let delay = (base * self.rng.random_range(0.8..1.2)).clamp(profile.min, profile.max);
        self.clock.wait(delay);
        self.last_op.insert(op, self.clock.now());
        trace!(op = op.as_str(), delay, "paced operation");

        delay
    }

    /// Scale a delay by a small uniform wobble
    pub fn natural_variance(&mut self, delay: f64) -> f64 {
        delay * self.rng.random_range(0.85..1.15)
    }
}
