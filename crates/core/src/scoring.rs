//! Scoring module - tile desirability from composable sub-scores
//!
//! Each tile's score is the product of three sub-scores:
//!
//! - **base**: rarity value, discounted once copies of the identity have
//!   been seen out of play
//! - **pattern**: affinity with the rest of the hand (pairs, sequence
//!   neighbors)
//! - **potential**: forward value, discounted per seen copy and boosted for
//!   central numeric values
//!
//! The scorer owns the session's [`SeenTileSet`]: a multiset of every tile
//! identity known to be out of play (discarded or revealed by anyone). It
//! grows monotonically for the session and never shrinks.

use std::collections::HashMap;

use mahjong_pilot_types::Tile;
use tracing::trace;

/// Multiplier when the hand holds a pair of the identity
pub const PAIR_WEIGHT: f64 = 1.2;

/// Weight on the sequence-potential contribution
pub const SEQUENCE_WEIGHT: f64 = 1.5;

/// Sequence potential added per neighboring value present in the hand
const NEIGHBOR_STEP: f64 = 0.2;

/// Potential discount per seen copy of the identity
const SEEN_DISCOUNT: f64 = 0.1;

/// Lower bound on the potential sub-score
const POTENTIAL_FLOOR: f64 = 0.5;

/// Multiset of tile identities known to be out of play
#[derive(Debug, Clone, Default)]
pub struct SeenTileSet {
    counts: HashMap<Tile, u32>,
    total: u32,
}

impl SeenTileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more observed copy of the identity
    pub fn record(&mut self, tile: Tile) {
        *self.counts.entry(tile).or_default() += 1;
        self.total += 1;
    }

    /// Observed copies of this identity
    pub fn count(&self, tile: Tile) -> u32 {
        self.counts.get(&tile).copied().unwrap_or(0)
    }

    /// Whether any copy of this identity has been observed
    pub fn contains(&self, tile: Tile) -> bool {
        self.counts.contains_key(&tile)
    }

    /// Total observed copies across all identities
    pub fn total(&self) -> u32 {
        self.total
    }
}

/// Tile valuation over a hand or candidate pool
#[derive(Debug, Clone, Default)]
pub struct TileScorer {
    seen: SeenTileSet,
}

impl TileScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> &SeenTileSet {
        &self.seen
    }

    /// Mark one copy of a tile as out of play
    ///
    /// Called whenever a tile becomes known: discarded by us or an
    /// opponent, or revealed in a meld.
    pub fn record_seen(&mut self, tile: Tile) {
        self.seen.record(tile);
    }

    /// Score every distinct identity in `tiles`
    ///
    /// Duplicate copies in the input share one entry, looked up by
    /// identity. Scores are strictly positive.
    pub fn score(&self, tiles: &[Tile]) -> HashMap<Tile, f64> {
        let mut scores = HashMap::with_capacity(tiles.len());
        for &tile in tiles {
            scores.entry(tile).or_insert_with(|| {
                let score =
                    self.base_score(tile) * self.pattern_score(tile, tiles) * self.potential_score(tile);
                trace!(tile = %tile, score, "scored tile");
                score
            });
        }
        scores
    }

    /// Rarity sub-score
    ///
    /// Honors are worth 1.2 until a copy shows up, then 1.0. Numeric tiles
    /// combine a middle-value bonus (1.2 for values 4-6) with an unseen
    /// bonus (1.1).
    pub fn base_score(&self, tile: Tile) -> f64 {
        let unseen = !self.seen.contains(tile);
        if tile.kind().is_honor() {
            return if unseen { 1.2 } else { 1.0 };
        }

        let middle_bonus = if (4..=6).contains(&tile.value()) { 1.2 } else { 1.0 };
        let unseen_bonus = if unseen { 1.1 } else { 1.0 };
        middle_bonus * unseen_bonus
    }

    /// Hand-affinity sub-score
    ///
    /// Pairs multiply by [`PAIR_WEIGHT`]; numeric tiles additionally scale
    /// with their sequence potential against the rest of the hand.
    pub fn pattern_score(&self, tile: Tile, tiles: &[Tile]) -> f64 {
        let mut score = 1.0;

        let copies = tiles.iter().filter(|&&t| t == tile).count();
        if copies >= 2 {
            score *= PAIR_WEIGHT;
        }

        if tile.kind().is_numeric() {
            score *= 1.0 + self.sequence_potential(tile, tiles) * SEQUENCE_WEIGHT;
        }

        score
    }

    /// Forward-value sub-score
    ///
    /// Discounted [`SEEN_DISCOUNT`] per observed copy, boosted 1.2 for
    /// numeric values 3-7, floored at [`POTENTIAL_FLOOR`].
    pub fn potential_score(&self, tile: Tile) -> f64 {
        let mut potential = 1.0 - SEEN_DISCOUNT * f64::from(self.seen.count(tile));

        if tile.kind().is_numeric() && (3..=7).contains(&tile.value()) {
            potential *= 1.2;
        }

        potential.max(POTENTIAL_FLOOR)
    }

    /// Fraction of a sequence window around `tile` covered by the hand
    ///
    /// Scans values `value-2 ..= value+2` clipped to `1..=9`; each value of
    /// the same suit present in the hand (the tile's own value included)
    /// adds [`NEIGHBOR_STEP`]. Capped at 1.0.
    fn sequence_potential(&self, tile: Tile, tiles: &[Tile]) -> f64 {
        let value = i32::from(tile.value());
        let mut potential = 0.0;

        for v in (value - 2)..=(value + 2) {
            if !(1..=9).contains(&v) {
                continue;
            }
            let present = tiles
                .iter()
                .any(|t| t.kind() == tile.kind() && i32::from(t.value()) == v);
            if present {
                potential += NEIGHBOR_STEP;
            }
        }

        potential.min(1.0)
    }

    /// Reorder `tiles` by descending score, stable otherwise
    pub fn rank(&self, tiles: &[Tile]) -> Vec<Tile> {
        let scores = self.score(tiles);
        let mut ranked = tiles.to_vec();
        ranked.sort_by(|a, b| scores[b].total_cmp(&scores[a]));
        ranked
    }
}
