//! Context module - turn tracking and game-stage classification
//!
//! [`GameContext`] counts observed opponent actions and derives the coarse
//! game stage from the turn count. Deterministic given the turn history;
//! there is no randomness here.

use std::collections::HashMap;

use mahjong_pilot_types::{GameStage, OpponentAction, Tile};
use tracing::debug;

/// Per-session turn and stage tracker
///
/// Mutated only by [`GameContext::record_opponent_action`]; every recorded
/// action advances the turn count and recomputes the stage. Lifetime is one
/// game session.
#[derive(Debug, Clone, Default)]
pub struct GameContext {
    turn_count: u32,
    stage: GameStage,
    opponent_actions: HashMap<OpponentAction, Vec<Vec<Tile>>>,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observed opponent action and the tiles it exposed
    pub fn record_opponent_action(&mut self, action: OpponentAction, tiles: &[Tile]) {
        self.opponent_actions
            .entry(action)
            .or_default()
            .push(tiles.to_vec());
        self.turn_count += 1;
        self.stage = GameStage::from_turn(self.turn_count);
        debug!(
            action = action.as_str(),
            turn = self.turn_count,
            stage = self.stage.as_str(),
            "opponent action recorded"
        );
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn stage(&self) -> GameStage {
        self.stage
    }

    /// Score multiplier for the current stage (1.2 / 1.0 / 0.8)
    pub fn stage_factor(&self) -> f64 {
        self.stage.factor()
    }

    /// All recorded tile groups for one action kind, oldest first
    pub fn recorded(&self, action: OpponentAction) -> &[Vec<Tile>] {
        self.opponent_actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_pilot_types::TileKind;

    fn tile(kind: TileKind, value: u8) -> Tile {
        Tile::new(kind, value).unwrap()
    }

    #[test]
    fn test_new_context_is_early() {
        let context = GameContext::new();
        assert_eq!(context.turn_count(), 0);
        assert_eq!(context.stage(), GameStage::Early);
        assert_eq!(context.stage_factor(), 1.2);
    }

    #[test]
    fn test_recording_advances_turns_and_stage() {
        let mut context = GameContext::new();
        let discard = [tile(TileKind::Wan, 1)];

        for _ in 0..7 {
            context.record_opponent_action(OpponentAction::Discard, &discard);
        }
        assert_eq!(context.stage(), GameStage::Early);

        context.record_opponent_action(OpponentAction::Discard, &discard);
        assert_eq!(context.turn_count(), 8);
        assert_eq!(context.stage(), GameStage::Middle);
        assert_eq!(context.stage_factor(), 1.0);

        for _ in 0..8 {
            context.record_opponent_action(OpponentAction::Discard, &discard);
        }
        assert_eq!(context.turn_count(), 16);
        assert_eq!(context.stage(), GameStage::Late);
        assert_eq!(context.stage_factor(), 0.8);
    }

    #[test]
    fn test_actions_are_grouped_by_kind() {
        let mut context = GameContext::new();
        let pung = [
            tile(TileKind::Tong, 3),
            tile(TileKind::Tong, 3),
            tile(TileKind::Tong, 3),
        ];

        context.record_opponent_action(OpponentAction::Discard, &[tile(TileKind::Suo, 9)]);
        context.record_opponent_action(OpponentAction::Pung, &pung);

        assert_eq!(context.recorded(OpponentAction::Discard).len(), 1);
        assert_eq!(context.recorded(OpponentAction::Pung), &[pung.to_vec()]);
        assert!(context.recorded(OpponentAction::Kong).is_empty());
    }
}
