//! Session module - one game's decision loop
//!
//! [`Session`] wires the scorer, decision simulator, operation pacer, and
//! game context into the engine's two decision operations: choosing a
//! discard from a hand and drafting a starting selection from a candidate
//! pool. Collaborators feed it typed tile observations; it hands back chosen
//! tiles and the humanlike delays that accompany them.
//!
//! Every wait is taken on the injected clock before a decision is returned,
//! so a caller can never act on a choice faster than the simulated human
//! would have made it.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use mahjong_pilot_core::clock::{Clock, MonotonicClock};
use mahjong_pilot_core::decision::{DecisionError, DecisionSimulator, ScoredOption};
use mahjong_pilot_core::scoring::TileScorer;
use mahjong_pilot_core::timing::OperationPacer;
use mahjong_pilot_core::GameContext;
use mahjong_pilot_types::{
    GameOp, OpponentAction, Tile, TimedAction, SELECTION_LIMIT, SELECTION_WINDOW,
};

use crate::journal::{DecisionJournal, EntryKind, JournalEntry};

/// Decorrelates the pacer and selection-heuristic streams from each other
const PACER_SEED_SALT: u64 = 0x51ed_270b_7a64_97c5;
const SELECT_SEED_SALT: u64 = 0xc13f_a9a9_02a6_3283;

/// A chosen discard and the delay that accompanied it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscardDecision {
    pub tile: Tile,
    /// Reaction delay already waited out, in seconds
    pub delay: f64,
}

/// One game session's decision engine
pub struct Session {
    scorer: TileScorer,
    decision: DecisionSimulator,
    pacer: OperationPacer,
    context: GameContext,
    journal: DecisionJournal,
    clock: Arc<dyn Clock>,
    rng: StdRng,
}

impl Session {
    /// Session on the real-time clock
    pub fn new(seed: u64) -> Self {
        Self::with_clock(seed, Arc::new(MonotonicClock::new()))
    }

    /// Session on an injected clock (virtual time in tests)
    pub fn with_clock(seed: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            scorer: TileScorer::new(),
            decision: DecisionSimulator::new(seed, clock.clone()),
            pacer: OperationPacer::new(seed ^ PACER_SEED_SALT, clock.clone()),
            context: GameContext::new(),
            journal: DecisionJournal::new(),
            clock,
            rng: StdRng::seed_from_u64(seed ^ SELECT_SEED_SALT),
        }
    }

    /// Choose which tile to discard from `hand`
    ///
    /// Scores the hand, weights the options by the current stage factor,
    /// lets the decision simulator pick (occasionally deliberately
    /// suboptimal), waits out the discard pacing, and records the discard
    /// as seen. The returned delay has already elapsed on the clock.
    pub fn choose_discard(&mut self, hand: &[Tile]) -> Result<DiscardDecision, DecisionError> {
        let factor = self.context.stage_factor();
        let scores = self.scorer.score(hand);

        // Options in hand order, one per identity, so ties and the
        // suboptimal branch stay reproducible under a fixed seed.
        let mut options: Vec<ScoredOption<Tile>> = Vec::with_capacity(scores.len());
        for &tile in hand {
            if options.iter().any(|o| o.item == tile) {
                continue;
            }
            options.push(ScoredOption::new(tile, scores[&tile] * factor));
        }

        let chosen = *self.decision.choose_best(&options)?;
        let delay = self.decision.reaction_time(TimedAction::Decision);
        self.pacer.pace(GameOp::Discard);

        self.scorer.record_seen(chosen.item);
        self.journal.push(JournalEntry::new(
            EntryKind::Discard,
            self.context.turn_count(),
            chosen.item,
            delay,
            self.context.stage(),
            chosen.score,
        ));
        debug!(tile = %chosen.item, delay, "discard chosen");

        Ok(DiscardDecision {
            tile: chosen.item,
            delay,
        })
    }

    /// Draft up to 13 tiles from `pool`, without replacement
    ///
    /// Each round re-ranks the remaining pool and picks among the top
    /// candidates with a lightly randomized selection heuristic, pausing
    /// with a humanlike click cadence between picks. Chosen tiles are
    /// removed from `pool`; a pool of 13 distinct tiles is drained
    /// completely.
    pub fn select_tiles(&mut self, pool: &mut Vec<Tile>) -> Vec<Tile> {
        let _ = self.decision.reaction_time(TimedAction::Other);
        self.pacer.pace(GameOp::Select);

        let mut selected = Vec::new();
        for _ in 0..SELECTION_LIMIT {
            if pool.is_empty() {
                break;
            }

            let ranked = self.scorer.rank(pool);
            let window = &ranked[..ranked.len().min(SELECTION_WINDOW)];
            let options: Vec<ScoredOption<Tile>> = window
                .iter()
                .map(|&tile| ScoredOption::new(tile, self.selection_score(tile)))
                .collect();

            let Ok(choice) = self.decision.choose_best(&options) else {
                break;
            };
            let chosen = *choice;

            let click = self.decision.reaction_time(TimedAction::Click);
            let wait = self.pacer.natural_variance(click);
            self.clock.wait(wait);

            if let Some(position) = pool.iter().position(|&t| t == chosen.item) {
                pool.remove(position);
            }
            self.journal.push(JournalEntry::new(
                EntryKind::Select,
                self.context.turn_count(),
                chosen.item,
                wait,
                self.context.stage(),
                chosen.score,
            ));
            selected.push(chosen.item);
        }

        for &tile in &selected {
            self.scorer.record_seen(tile);
        }
        debug!(count = selected.len(), "selection complete");

        selected
    }

    /// Feed one observed opponent action into the session
    ///
    /// Every exposed tile joins the seen multiset; the context advances a
    /// turn and recomputes the stage.
    pub fn note_opponent_action(&mut self, action: OpponentAction, tiles: &[Tile]) {
        for &tile in tiles {
            self.scorer.record_seen(tile);
        }
        self.context.record_opponent_action(action, tiles);
    }

    /// Selection heuristic: a lightly randomized per-tile score
    ///
    /// Honors get a 1.1 bump; values 4-6 a 1.2 bump (for honors that only
    /// reaches Wind 4).
    fn selection_score(&mut self, tile: Tile) -> f64 {
        let mut score = self.rng.random_range(0.8..1.2);
        if tile.kind().is_honor() {
            score *= 1.1;
        }
        if (4..=6).contains(&tile.value()) {
            score *= 1.2;
        }
        score
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn scorer(&self) -> &TileScorer {
        &self.scorer
    }

    pub fn journal(&self) -> &DecisionJournal {
        &self.journal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_pilot_core::clock::ManualClock;
    use mahjong_pilot_types::{GameStage, TileKind};

    fn tile(kind: TileKind, value: u8) -> Tile {
        Tile::new(kind, value).unwrap()
    }

    fn session(seed: u64) -> (Session, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (Session::with_clock(seed, clock.clone()), clock)
    }

    #[test]
    fn test_choose_discard_returns_a_hand_tile() {
        let (mut session, _clock) = session(1);
        let hand = [
            tile(TileKind::Wan, 1),
            tile(TileKind::Wan, 2),
            tile(TileKind::Wan, 3),
            tile(TileKind::Tong, 5),
            tile(TileKind::Suo, 7),
        ];

        let decision = session.choose_discard(&hand).unwrap();
        assert!(hand.contains(&decision.tile));
        assert!(decision.delay > 0.0);
    }

    #[test]
    fn test_choose_discard_records_the_tile_as_seen() {
        let (mut session, _clock) = session(2);
        let hand = [tile(TileKind::Dragon, 1), tile(TileKind::Dragon, 2)];

        let decision = session.choose_discard(&hand).unwrap();
        assert_eq!(session.scorer().seen().count(decision.tile), 1);
    }

    #[test]
    fn test_choose_discard_empty_hand_is_an_error() {
        let (mut session, _clock) = session(3);
        assert_eq!(
            session.choose_discard(&[]),
            Err(DecisionError::EmptyOptions)
        );
    }

    #[test]
    fn test_choose_discard_waits_on_the_clock() {
        let (mut session, clock) = session(4);
        let hand = [tile(TileKind::Wan, 9)];

        let before = clock.now();
        session.choose_discard(&hand).unwrap();
        // At minimum the discard pacing elapsed.
        assert!(clock.now() >= before + GameOp::Discard.pace_profile().min);
    }

    #[test]
    fn test_note_opponent_action_advances_context_and_seen() {
        let (mut session, _clock) = session(5);
        let discard = [tile(TileKind::Suo, 3)];

        for _ in 0..8 {
            session.note_opponent_action(OpponentAction::Discard, &discard);
        }

        assert_eq!(session.context().turn_count(), 8);
        assert_eq!(session.context().stage(), GameStage::Middle);
        assert_eq!(session.scorer().seen().count(discard[0]), 8);
    }

    #[test]
    fn test_same_seed_reproduces_the_session() {
        let (mut a, _ca) = session(6);
        let (mut b, _cb) = session(6);
        let hand = [
            tile(TileKind::Wan, 2),
            tile(TileKind::Wan, 3),
            tile(TileKind::Tong, 8),
            tile(TileKind::Wind, 1),
        ];

        for _ in 0..10 {
            let da = a.choose_discard(&hand).unwrap();
            let db = b.choose_discard(&hand).unwrap();
            assert_eq!(da, db);
        }
    }

    #[test]
    fn test_journal_grows_with_decisions() {
        let (mut session, _clock) = session(7);
        let hand = [tile(TileKind::Tong, 1), tile(TileKind::Tong, 2)];

        session.choose_discard(&hand).unwrap();
        session.choose_discard(&hand).unwrap();

        assert_eq!(session.journal().len(), 2);
        assert_eq!(session.journal().entries()[0].kind, EntryKind::Discard);
    }
}
