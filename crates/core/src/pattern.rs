//! Pattern module - cadence self-similarity detection
//!
//! Machine-driven input tends to repeat its rhythm. [`PatternDetector`]
//! compares the two most recent windows of action timestamps: each window is
//! reduced to its consecutive inter-arrival differences, min-max normalized,
//! and the windows are compared by root-mean-square distance. A similarity
//! above the threshold means the recent cadence echoes the preceding one too
//! closely and the next delay should be perturbed.
//!
//! Detection is a pure function of the input history: no internal state, no
//! randomness.

use mahjong_pilot_types::{PATTERN_WINDOW, SIMILARITY_THRESHOLD};

use crate::history::ActionRecord;

/// Windowed cadence comparator
#[derive(Debug, Clone, Copy)]
pub struct PatternDetector {
    window: usize,
    threshold: f64,
}

impl PatternDetector {
    /// Detector with the engine's fixed window and threshold
    pub fn new() -> Self {
        Self {
            window: PATTERN_WINDOW,
            threshold: SIMILARITY_THRESHOLD,
        }
    }

    /// Detector with explicit parameters
    pub fn with_params(window: usize, threshold: f64) -> Self {
        Self { window, threshold }
    }

    /// Whether the trailing cadence repeats the one before it
    ///
    /// Returns `false` until the history holds at least two full windows.
    pub fn detect(&self, history: &[ActionRecord]) -> bool {
        if history.len() < self.window * 2 {
            return false;
        }

        let tail = &history[history.len() - self.window * 2..];
        let (older, newer) = tail.split_at(self.window);

        let older_diffs = inter_arrival(older);
        let newer_diffs = inter_arrival(newer);

        self.similarity(&older_diffs, &newer_diffs) > self.threshold
    }

    /// Similarity of two difference sequences in `[0, 1]`
    ///
    /// Sequences are normalized independently, compared pairwise by
    /// position, and the RMS distance `d` becomes `1 / (1 + d)`. An empty
    /// sequence on either side yields 0.
    pub fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let a = normalize(a);
        let b = normalize(b);

        let n = a.len().min(b.len());
        let mean_sq = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            / n as f64;
        let distance = mean_sq.sqrt();

        1.0 / (1.0 + distance)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Consecutive timestamp differences within one window
fn inter_arrival(records: &[ActionRecord]) -> Vec<f64> {
    records
        .windows(2)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
        .collect()
}

/// Min-max scale a sequence into `[0, 1]`
///
/// A constant sequence maps every element to 0.5.
fn normalize(seq: &[f64]) -> Vec<f64> {
    let min = seq.iter().copied().fold(f64::INFINITY, f64::min);
    let max = seq.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![0.5; seq.len()];
    }
    seq.iter().map(|&x| (x - min) / (max - min)).collect()
}
