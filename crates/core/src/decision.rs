//! Decision module - humanlike choice with adaptive error
//!
//! A perfect argmax player is a tell. [`DecisionSimulator`] wraps scored
//! options with a small, performance-adaptive probability of deliberately
//! choosing a near-best option instead of the best one, and exposes a
//! reaction-time simulation that slows down under cognitive load (rapid
//! recent activity).
//!
//! The error rate starts at [`BASE_ERROR_RATE`] and drifts with the average
//! delay of recent reactions - a player who is taking longer is also making
//! more mistakes - clamped to `[ERROR_RATE_MIN, ERROR_RATE_MAX]`.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use mahjong_pilot_types::{
    TimedAction, BASE_ERROR_RATE, ERROR_LEARNING_RATE, ERROR_RATE_MAX, ERROR_RATE_MIN,
    PERFORMANCE_HISTORY_CAP,
};

use crate::clock::Clock;
use crate::history::{History, PerformanceRecord};
use crate::timing::ActionTimingSimulator;

/// Performance records consulted for the adaptive error rate
const ERROR_RATE_LOOKBACK: usize = 10;

/// Performance records consulted for cognitive load
const LOAD_LOOKBACK: usize = 5;

/// Average-delay pivot: above this the error rate rises, below it falls
const DELAY_PIVOT: f64 = 0.5;

/// Decorrelates the timing simulator's stream from the decision stream
const TIMING_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Errors surfaced by decision operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// `choose_best` was handed an empty options list
    #[error("no options to choose from")]
    EmptyOptions,
}

/// An item paired with its score
///
/// Explicit record instead of a bare tuple so ordering and tie-break rules
/// stay visible at call sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredOption<T> {
    pub item: T,
    pub score: f64,
}

impl<T> ScoredOption<T> {
    pub fn new(item: T, score: f64) -> Self {
        Self { item, score }
    }
}

/// Humanlike chooser over scored options
pub struct DecisionSimulator {
    rng: StdRng,
    timing: ActionTimingSimulator,
    clock: Arc<dyn Clock>,
    performance: History<PerformanceRecord, PERFORMANCE_HISTORY_CAP>,
}

impl DecisionSimulator {
    pub fn new(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            timing: ActionTimingSimulator::new(seed ^ TIMING_SEED_SALT, clock.clone()),
            clock,
            performance: History::new(),
        }
    }

    /// Choose among scored options, occasionally deliberately suboptimal
    ///
    /// With probability equal to the current error rate (and more than one
    /// option available) the pick is uniform among the second- and
    /// third-best options. Otherwise the first maximum-score option in
    /// input order wins.
    pub fn choose_best<'a, T>(
        &mut self,
        options: &'a [ScoredOption<T>],
    ) -> Result<&'a ScoredOption<T>, DecisionError> {
        let rate = self.error_rate();
        self.choose_with_error_rate(options, rate)
    }

    /// Current adaptive error rate, clamped to its configured bounds
    pub fn error_rate(&self) -> f64 {
        let mut rate = BASE_ERROR_RATE;

        let recent = self.performance.recent(ERROR_RATE_LOOKBACK);
        if !recent.is_empty() {
            let avg_delay =
                recent.iter().map(|r| r.delay).sum::<f64>() / recent.len() as f64;
            rate += ERROR_LEARNING_RATE * (avg_delay - DELAY_PIVOT);
        }

        rate.clamp(ERROR_RATE_MIN, ERROR_RATE_MAX)
    }

    /// Simulate the reaction time for one event and record it
    ///
    /// The base delay comes from the timing simulator and is stretched by
    /// the current cognitive load, so bursts of rapid activity produce
    /// slower reactions.
    pub fn reaction_time(&mut self, action: TimedAction) -> f64 {
        let base = self.timing.delay(action);
        let load = self.cognitive_load();
        let delay = base * (1.0 + load);

        self.performance.push(PerformanceRecord {
            action,
            delay,
            timestamp: self.clock.now(),
        });

        delay
    }

    /// Cognitive load in `[0, 1]` from the recent reaction cadence
    ///
    /// `max(0, 1 - mean_interval / 2)` over the last few performance
    /// records; 0 until at least two records exist.
    pub fn cognitive_load(&self) -> f64 {
        let recent = self.performance.recent(LOAD_LOOKBACK);
        if recent.len() < 2 {
            return 0.0;
        }

        let mean_interval = recent
            .windows(2)
            .map(|pair| pair[1].timestamp - pair[0].timestamp)
            .sum::<f64>()
            / (recent.len() - 1) as f64;

        (1.0 - mean_interval / 2.0).max(0.0)
    }

    /// Recorded performance samples, oldest first
    pub fn performance(&self) -> &[PerformanceRecord] {
        self.performance.as_slice()
    }

    /// Recorded timing samples of the owned timing simulator
    pub fn timing_history(&self) -> &[crate::history::ActionRecord] {
        self.timing.history()
    }

    fn choose_with_error_rate<'a, T>(
        &mut self,
        options: &'a [ScoredOption<T>],
        rate: f64,
    ) -> Result<&'a ScoredOption<T>, DecisionError> {
        if options.is_empty() {
            return Err(DecisionError::EmptyOptions);
        }

        if options.len() > 1 && self.rng.random_bool(rate) {
            let mut order: Vec<usize> = (0..options.len()).collect();
            order.sort_by(|&a, &b| options[b].score.total_cmp(&options[a].score));

            // Second- or third-best, whichever exist.
            let upper = order.len().min(3);
            let pick = order[self.rng.random_range(1..upper)];
            debug!(index = pick, "deliberate suboptimal pick");
            return Ok(&options[pick]);
        }

        // First maximum in input order. Iterator::max_by keeps the last
        // maximum on ties, so scan explicitly.
        let mut best = &options[0];
        for option in &options[1..] {
            if option.score > best.score {
                best = option;
            }
        }
        Ok(best)
    }
}
