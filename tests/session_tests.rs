//! Session tests - end-to-end decision flow over the facade API

use std::sync::Arc;

use mahjong_pilot::core::{Clock, ManualClock};
use mahjong_pilot::engine::{EntryKind, Session};
use mahjong_pilot::types::{full_deck, GameStage, OpponentAction, Tile, TileKind};

fn tile(kind: TileKind, value: u8) -> Tile {
    Tile::new(kind, value).unwrap()
}

fn session(seed: u64) -> (Session, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (Session::with_clock(seed, clock.clone()), clock)
}

/// Thirteen distinct tiles spanning every kind
fn thirteen_distinct() -> Vec<Tile> {
    vec![
        tile(TileKind::Wan, 1),
        tile(TileKind::Wan, 4),
        tile(TileKind::Wan, 7),
        tile(TileKind::Tong, 2),
        tile(TileKind::Tong, 5),
        tile(TileKind::Tong, 8),
        tile(TileKind::Suo, 3),
        tile(TileKind::Suo, 6),
        tile(TileKind::Suo, 9),
        tile(TileKind::Wind, 1),
        tile(TileKind::Wind, 3),
        tile(TileKind::Dragon, 1),
        tile(TileKind::Dragon, 3),
    ]
}

#[test]
fn test_selecting_13_from_13_drains_the_pool() {
    let (mut session, _clock) = session(1);
    let mut pool = thirteen_distinct();
    let expected = pool.clone();

    let mut selected = session.select_tiles(&mut pool);

    assert!(pool.is_empty());
    assert_eq!(selected.len(), 13);
    // Every tile appears exactly once.
    selected.sort_by_key(|t| t.to_string());
    let mut sorted_expected = expected;
    sorted_expected.sort_by_key(|t| t.to_string());
    assert_eq!(selected, sorted_expected);
}

#[test]
fn test_selecting_from_a_small_pool_returns_at_most_its_size() {
    let (mut session, _clock) = session(2);
    let mut pool = vec![
        tile(TileKind::Wan, 2),
        tile(TileKind::Wan, 3),
        tile(TileKind::Tong, 7),
        tile(TileKind::Wind, 2),
        tile(TileKind::Dragon, 2),
    ];

    let selected = session.select_tiles(&mut pool);
    assert!(selected.len() <= 5);
    assert_eq!(selected.len(), 5);
    assert!(pool.is_empty());
}

#[test]
fn test_selection_caps_at_13_from_a_full_deck() {
    let (mut session, _clock) = session(3);
    let mut pool = full_deck();

    let selected = session.select_tiles(&mut pool);
    assert_eq!(selected.len(), 13);
    assert_eq!(pool.len(), 136 - 13);
}

#[test]
fn test_discard_comes_from_the_hand_and_is_journaled() {
    let (mut session, _clock) = session(4);
    let hand = [
        tile(TileKind::Wan, 1),
        tile(TileKind::Wan, 2),
        tile(TileKind::Wan, 3),
        tile(TileKind::Tong, 5),
        tile(TileKind::Suo, 7),
    ];

    let decision = session.choose_discard(&hand).unwrap();
    assert!(hand.contains(&decision.tile));

    let entries = session.journal().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, EntryKind::Discard);
    assert_eq!(entries[0].tile, decision.tile.to_string());
}

#[test]
fn test_stage_progresses_with_opponent_actions() {
    let (mut session, _clock) = session(5);
    let discard = [tile(TileKind::Suo, 1)];

    assert_eq!(session.context().stage(), GameStage::Early);
    assert_eq!(session.context().stage_factor(), 1.2);

    for _ in 0..8 {
        session.note_opponent_action(OpponentAction::Discard, &discard);
    }
    assert_eq!(session.context().stage(), GameStage::Middle);
    assert_eq!(session.context().stage_factor(), 1.0);

    for _ in 0..8 {
        session.note_opponent_action(OpponentAction::Discard, &discard);
    }
    assert_eq!(session.context().stage(), GameStage::Late);
    assert_eq!(session.context().stage_factor(), 0.8);
}

#[test]
fn test_opponent_tiles_discount_future_scoring() {
    let (mut session, _clock) = session(6);
    let target = tile(TileKind::Tong, 5);

    for _ in 0..3 {
        session.note_opponent_action(OpponentAction::Discard, &[target]);
    }
    assert_eq!(session.scorer().seen().count(target), 3);
}

#[test]
fn test_journal_writes_parseable_json_lines() {
    let (mut session, _clock) = session(7);
    let mut pool = thirteen_distinct();
    let hand = session.select_tiles(&mut pool);
    session.choose_discard(&hand).unwrap();

    let mut out = Vec::new();
    session.journal().write_json_lines(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // 13 selections plus 1 discard.
    assert_eq!(lines.len(), 14);

    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value["delay"].as_f64().unwrap() > 0.0);
        assert!(Tile::parse(value["tile"].as_str().unwrap()).is_some());
    }
}

#[test]
fn test_clock_advances_through_a_full_turn() {
    let (mut session, clock) = session(8);
    let hand = [
        tile(TileKind::Wan, 5),
        tile(TileKind::Tong, 5),
        tile(TileKind::Suo, 5),
    ];

    let before = clock.now();
    session.choose_discard(&hand).unwrap();
    assert!(clock.now() > before, "discard pacing must consume time");
}
