//! Core decision and pacing logic - seedable, clock-injected, and testable
//!
//! This crate contains the engine's algorithmic content: tile valuation,
//! cadence self-similarity detection, humanlike delay generation, and
//! error-adaptive choice. It performs no I/O of its own:
//!
//! - **Seedable**: every sampling component owns a `StdRng` seeded at
//!   construction, so a fixed seed reproduces an entire session
//! - **Clock-injected**: all timestamps and waits go through the [`Clock`]
//!   trait; tests advance a [`ManualClock`] instantly
//! - **Single-writer**: one session is mutated by one thread of control;
//!   nothing here locks
//!
//! # Module Structure
//!
//! - [`clock`]: injected time source (real and virtual)
//! - [`context`]: turn counting and game-stage classification
//! - [`decision`]: error-adaptive choice and reaction-time simulation
//! - [`history`]: bounded chronological action records
//! - [`pattern`]: cadence self-similarity detection
//! - [`scoring`]: tile desirability from composable sub-scores
//! - [`timing`]: humanlike delay generation and operation pacing
//!
//! # Example
//!
//! ```
//! use mahjong_pilot_core::TileScorer;
//! use mahjong_pilot_core::types::{Tile, TileKind};
//!
//! let mut scorer = TileScorer::new();
//! scorer.record_seen(Tile::new(TileKind::Wan, 5).unwrap());
//!
//! let hand = vec![
//!     Tile::new(TileKind::Wan, 4).unwrap(),
//!     Tile::new(TileKind::Wan, 5).unwrap(),
//!     Tile::new(TileKind::Wan, 6).unwrap(),
//! ];
//! let scores = scorer.score(&hand);
//! assert_eq!(scores.len(), 3);
//! ```

pub mod clock;
pub mod context;
pub mod decision;
pub mod history;
pub mod pattern;
pub mod scoring;
pub mod timing;

pub use mahjong_pilot_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use context::GameContext;
pub use decision::{DecisionError, DecisionSimulator, ScoredOption};
pub use history::{ActionRecord, History, PerformanceRecord};
pub use pattern::PatternDetector;
pub use scoring::{SeenTileSet, TileScorer};
pub use timing::{ActionTimingSimulator, OperationPacer};
