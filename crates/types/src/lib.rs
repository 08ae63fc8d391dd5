//! Core types module - tile identities, action classes, and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no heavy dependencies, making them
//! usable in any context (scoring, timing simulation, session orchestration).
//!
//! # Tile Ranges
//!
//! A tile identity is a `(kind, value)` pair. Valid value ranges per kind:
//!
//! | Kind | Values | Copies | Tiles |
//! |------|--------|--------|-------|
//! | `Wan` | 1-9 | 4 | 36 |
//! | `Tong` | 1-9 | 4 | 36 |
//! | `Suo` | 1-9 | 4 | 36 |
//! | `Wind` | 1-4 | 4 | 16 |
//! | `Dragon` | 1-3 | 4 | 12 |
//!
//! A full deck holds exactly 136 tiles across 34 distinct identities.
//! Construction outside these ranges fails with [`TileError::OutOfRange`];
//! no other path can produce a `Tile`.
//!
//! # Engine Constants
//!
//! All engine configuration is compiled in:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PATTERN_WINDOW` | 10 | Cadence comparison window length |
//! | `SIMILARITY_THRESHOLD` | 0.8 | Cadence similarity above which timing is perturbed |
//! | `BASE_ERROR_RATE` | 0.05 | Starting probability of a deliberate suboptimal pick |
//! | `ERROR_LEARNING_RATE` | 0.01 | Error-rate adjustment per second of average delay |
//! | `ERROR_RATE_MIN` | 0.01 | Lower clamp on the adaptive error rate |
//! | `ERROR_RATE_MAX` | 0.15 | Upper clamp on the adaptive error rate |
//! | `ACTION_HISTORY_CAP` | 100 | Timing history capacity (ring semantics) |
//! | `PERFORMANCE_HISTORY_CAP` | 50 | Performance history capacity (ring semantics) |
//! | `EARLY_STAGE_TURNS` | 8 | First turn that is no longer early game |
//! | `LATE_STAGE_TURNS` | 16 | First turn that counts as late game |
//! | `SELECTION_LIMIT` | 13 | Maximum tiles drawn by one selection decision |
//! | `SELECTION_WINDOW` | 5 | Ranked candidates considered per selection pick |
//!
//! # Examples
//!
//! ```
//! use mahjong_pilot_types::{full_deck, GameStage, Tile, TileKind};
//!
//! let tile = Tile::new(TileKind::Wan, 3).unwrap();
//! assert_eq!(tile.to_string(), "Wan3");
//! assert_eq!(Tile::parse("wan3"), Some(tile));
//!
//! assert!(Tile::new(TileKind::Wind, 5).is_err());
//!
//! assert_eq!(full_deck().len(), 136);
//! assert_eq!(GameStage::from_turn(0), GameStage::Early);
//! ```

use std::fmt;

use thiserror::Error;

/// Cadence comparison window length (entries per window)
pub const PATTERN_WINDOW: usize = 10;

/// Cadence similarity above which a delay is deliberately perturbed
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Starting probability of a deliberate suboptimal pick
pub const BASE_ERROR_RATE: f64 = 0.05;

/// Error-rate adjustment per second of average recent delay
pub const ERROR_LEARNING_RATE: f64 = 0.01;

/// Lower clamp on the adaptive error rate
pub const ERROR_RATE_MIN: f64 = 0.01;

/// Upper clamp on the adaptive error rate
pub const ERROR_RATE_MAX: f64 = 0.15;

/// Timing history capacity; oldest entries are evicted beyond this
pub const ACTION_HISTORY_CAP: usize = 100;

/// Performance history capacity; oldest entries are evicted beyond this
pub const PERFORMANCE_HISTORY_CAP: usize = 50;

/// First turn count that is no longer early game
pub const EARLY_STAGE_TURNS: u32 = 8;

/// First turn count that counts as late game
pub const LATE_STAGE_TURNS: u32 = 16;

/// Stage multiplier while fewer than `EARLY_STAGE_TURNS` turns have passed
pub const EARLY_STAGE_FACTOR: f64 = 1.2;

/// Stage multiplier for the middle game
pub const MIDDLE_STAGE_FACTOR: f64 = 1.0;

/// Stage multiplier from `LATE_STAGE_TURNS` onwards
pub const LATE_STAGE_FACTOR: f64 = 0.8;

/// Physical copies of each tile identity in a deck
pub const TILE_COPIES: usize = 4;

/// Total tiles in a full deck (34 identities x 4 copies)
pub const FULL_DECK_SIZE: usize = 136;

/// Distinct tile identities in a full deck
pub const DISTINCT_TILES: usize = 34;

/// Maximum tiles drawn by one selection decision
pub const SELECTION_LIMIT: usize = 13;

/// Ranked candidates considered per selection pick
pub const SELECTION_WINDOW: usize = 5;

/// The five tile kinds
///
/// `Wan`, `Tong`, and `Suo` are the numeric suits (values 1-9). `Wind`
/// (values 1-4) and `Dragon` (values 1-3) are the honor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Wan,
    Tong,
    Suo,
    Wind,
    Dragon,
}

impl TileKind {
    /// Whether this kind is a numeric suit (can form sequences)
    pub fn is_numeric(&self) -> bool {
        matches!(self, TileKind::Wan | TileKind::Tong | TileKind::Suo)
    }

    /// Whether this kind is an honor (wind or dragon)
    pub fn is_honor(&self) -> bool {
        !self.is_numeric()
    }

    /// Largest valid value for this kind
    pub fn max_value(&self) -> u8 {
        match self {
            TileKind::Wan | TileKind::Tong | TileKind::Suo => 9,
            TileKind::Wind => 4,
            TileKind::Dragon => 3,
        }
    }

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_pilot_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("wan"), Some(TileKind::Wan));
    /// assert_eq!(TileKind::from_str("Dragon"), Some(TileKind::Dragon));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wan" => Some(TileKind::Wan),
            "tong" => Some(TileKind::Tong),
            "suo" => Some(TileKind::Suo),
            "wind" => Some(TileKind::Wind),
            "dragon" => Some(TileKind::Dragon),
            _ => None,
        }
    }

    /// Convert to the canonical string form used in tile notation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Wan => "Wan",
            TileKind::Tong => "Tong",
            TileKind::Suo => "Suo",
            TileKind::Wind => "Wind",
            TileKind::Dragon => "Dragon",
        }
    }
}

/// Validation failure raised at tile construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileError {
    /// The value lies outside the kind's documented range
    #[error("value {value} out of range for {kind:?}")]
    OutOfRange { kind: TileKind, value: u8 },
}

/// A tile identity - an immutable `(kind, value)` pair
///
/// Physical duplicates share one identity: equality and hashing are by
/// `(kind, value)`. The only constructor is [`Tile::new`], which enforces
/// the per-kind value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    kind: TileKind,
    value: u8,
}

impl Tile {
    /// Construct a tile, validating the value against the kind's range
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_pilot_types::{Tile, TileError, TileKind};
    ///
    /// assert!(Tile::new(TileKind::Suo, 9).is_ok());
    /// assert_eq!(
    ///     Tile::new(TileKind::Dragon, 4),
    ///     Err(TileError::OutOfRange { kind: TileKind::Dragon, value: 4 })
    /// );
    /// ```
    pub fn new(kind: TileKind, value: u8) -> Result<Self, TileError> {
        if value < 1 || value > kind.max_value() {
            return Err(TileError::OutOfRange { kind, value });
        }
        Ok(Self { kind, value })
    }

    /// The tile's kind
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// The tile's value within its kind
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Parse the canonical notation produced by `Display` (case-insensitive)
    ///
    /// Returns `None` for malformed or out-of-range input.
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_pilot_types::{Tile, TileKind};
    ///
    /// assert_eq!(Tile::parse("Tong5"), Tile::new(TileKind::Tong, 5).ok());
    /// assert_eq!(Tile::parse("wind9"), None);
    /// assert_eq!(Tile::parse("Wan"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let split = s.find(|c: char| c.is_ascii_digit())?;
        let kind = TileKind::from_str(&s[..split])?;
        let value = s[split..].parse::<u8>().ok()?;
        Tile::new(kind, value).ok()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.as_str(), self.value)
    }
}

/// Build a full deck: every identity with [`TILE_COPIES`] physical copies
///
/// Yields exactly [`FULL_DECK_SIZE`] tiles in a deterministic order
/// (numeric suits first, then winds, then dragons).
pub fn full_deck() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(FULL_DECK_SIZE);
    for kind in [
        TileKind::Wan,
        TileKind::Tong,
        TileKind::Suo,
        TileKind::Wind,
        TileKind::Dragon,
    ] {
        for value in 1..=kind.max_value() {
            for _ in 0..TILE_COPIES {
                tiles.push(Tile { kind, value });
            }
        }
    }
    tiles
}

/// Action classes recognized by the timing simulator
///
/// Each class maps to a base delay range; `Other` covers anything the
/// simulator has no dedicated profile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimedAction {
    Click,
    Move,
    Drag,
    Decision,
    Other,
}

impl TimedAction {
    /// Base delay range in seconds for this action class
    pub fn delay_range(&self) -> (f64, f64) {
        match self {
            TimedAction::Click => (0.3, 0.8),
            TimedAction::Move => (0.2, 0.5),
            TimedAction::Drag => (0.4, 0.9),
            TimedAction::Decision => (0.8, 2.0),
            TimedAction::Other => (0.5, 1.0),
        }
    }

    /// Parse action class from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "click" => Some(TimedAction::Click),
            "move" => Some(TimedAction::Move),
            "drag" => Some(TimedAction::Drag),
            "decision" => Some(TimedAction::Decision),
            "other" => Some(TimedAction::Other),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TimedAction::Click => "click",
            TimedAction::Move => "move",
            TimedAction::Drag => "drag",
            TimedAction::Decision => "decision",
            TimedAction::Other => "other",
        }
    }
}

/// Pacing profile for a game-level operation (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceProfile {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Game-level operations paced by the operation pacer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOp {
    Select,
    Discard,
    Pung,
    Kong,
}

impl GameOp {
    /// Delay profile for this operation
    ///
    /// Claiming operations (pung/kong) carry the longest pauses: a human
    /// reacts to another player's discard before acting.
    pub fn pace_profile(&self) -> PaceProfile {
        match self {
            GameOp::Select => PaceProfile { min: 0.3, max: 1.2, mean: 0.6 },
            GameOp::Discard => PaceProfile { min: 0.5, max: 2.0, mean: 1.0 },
            GameOp::Pung => PaceProfile { min: 0.8, max: 2.5, mean: 1.5 },
            GameOp::Kong => PaceProfile { min: 1.0, max: 3.0, mean: 1.8 },
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOp::Select => "select",
            GameOp::Discard => "discard",
            GameOp::Pung => "pung",
            GameOp::Kong => "kong",
        }
    }
}

/// Observed opponent events fed into the game context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpponentAction {
    Discard,
    Pung,
    Kong,
    Reveal,
}

impl OpponentAction {
    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OpponentAction::Discard => "discard",
            OpponentAction::Pung => "pung",
            OpponentAction::Kong => "kong",
            OpponentAction::Reveal => "reveal",
        }
    }
}

/// Coarse game stage derived from the turn count
///
/// The stage biases decision aggressiveness: early game plays loose,
/// late game plays tight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStage {
    #[default]
    Early,
    Middle,
    Late,
}

impl GameStage {
    /// Derive the stage from a turn count
    ///
    /// # Examples
    ///
    /// ```
    /// use mahjong_pilot_types::GameStage;
    ///
    /// assert_eq!(GameStage::from_turn(7), GameStage::Early);
    /// assert_eq!(GameStage::from_turn(8), GameStage::Middle);
    /// assert_eq!(GameStage::from_turn(16), GameStage::Late);
    /// ```
    pub fn from_turn(turn_count: u32) -> Self {
        if turn_count < EARLY_STAGE_TURNS {
            GameStage::Early
        } else if turn_count < LATE_STAGE_TURNS {
            GameStage::Middle
        } else {
            GameStage::Late
        }
    }

    /// Score multiplier for this stage
    pub fn factor(&self) -> f64 {
        match self {
            GameStage::Early => EARLY_STAGE_FACTOR,
            GameStage::Middle => MIDDLE_STAGE_FACTOR,
            GameStage::Late => LATE_STAGE_FACTOR,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStage::Early => "early",
            GameStage::Middle => "middle",
            GameStage::Late => "late",
        }
    }
}
