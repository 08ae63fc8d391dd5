//! Headless session driver (default binary).
//!
//! Plays one scripted stretch of a game on a virtual clock: drafts a hand
//! from a shuffled deck, alternates opponent discards with our own, and
//! prints the decision journal as JSON lines.
//!
//! Pass a seed as the first argument to reproduce a run exactly.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use mahjong_pilot::core::ManualClock;
use mahjong_pilot::engine::Session;
use mahjong_pilot::types::{full_deck, OpponentAction};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .context("seed must be an unsigned integer")?,
        None => 1,
    };

    run(seed)
}

fn run(seed: u64) -> Result<()> {
    // Virtual clock: the humanlike pacing shapes the journal's timestamps
    // without sleeping through a demo run.
    let clock = Arc::new(ManualClock::new());
    let mut session = Session::with_clock(seed, clock);

    let mut wall = full_deck();
    let mut rng = StdRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);

    let mut hand = session.select_tiles(&mut wall);

    // Alternate opponent discards with our own until the late game.
    for _ in 0..20 {
        let Some(opponent_tile) = wall.pop() else { break };
        session.note_opponent_action(OpponentAction::Discard, &[opponent_tile]);

        let decision = session.choose_discard(&hand)?;
        if let Some(position) = hand.iter().position(|&t| t == decision.tile) {
            hand.remove(position);
        }
        if let Some(drawn) = wall.pop() {
            hand.push(drawn);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.journal().write_json_lines(&mut out)?;
    writeln!(
        out,
        "turns={} stage={} seen={}",
        session.context().turn_count(),
        session.context().stage().as_str(),
        session.scorer().seen().total(),
    )?;

    Ok(())
}
