use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mahjong_pilot::core::{
    ActionRecord, ActionTimingSimulator, DecisionSimulator, ManualClock, PatternDetector,
    ScoredOption, TileScorer,
};
use mahjong_pilot::types::{full_deck, TimedAction};

fn bench_score_hand(c: &mut Criterion) {
    let scorer = TileScorer::new();
    let hand: Vec<_> = full_deck().into_iter().step_by(9).take(14).collect();

    c.bench_function("score_14_tile_hand", |b| {
        b.iter(|| scorer.score(black_box(&hand)))
    });
}

fn bench_rank_full_deck(c: &mut Criterion) {
    let scorer = TileScorer::new();
    let deck = full_deck();

    c.bench_function("rank_full_deck", |b| b.iter(|| scorer.rank(black_box(&deck))));
}

fn bench_pattern_detect(c: &mut Criterion) {
    let detector = PatternDetector::new();
    let history: Vec<ActionRecord> = (0..100)
        .map(|i| ActionRecord {
            action: TimedAction::Click,
            delay: 0.5,
            timestamp: i as f64 * 0.73,
        })
        .collect();

    c.bench_function("pattern_detect_full_history", |b| {
        b.iter(|| detector.detect(black_box(&history)))
    });
}

fn bench_delay_sample(c: &mut Criterion) {
    let clock = Arc::new(ManualClock::new());
    let mut sim = ActionTimingSimulator::new(12345, clock);

    c.bench_function("delay_sample", |b| {
        b.iter(|| sim.delay(black_box(TimedAction::Decision)))
    });
}

fn bench_choose_best(c: &mut Criterion) {
    let clock = Arc::new(ManualClock::new());
    let mut sim = DecisionSimulator::new(12345, clock);
    let options: Vec<ScoredOption<u32>> = (0..34)
        .map(|i| ScoredOption::new(i, f64::from(i % 7) * 0.3))
        .collect();

    c.bench_function("choose_best_34_options", |b| {
        b.iter(|| sim.choose_best(black_box(&options)))
    });
}

criterion_group!(
    benches,
    bench_score_hand,
    bench_rank_full_deck,
    bench_pattern_detect,
    bench_delay_sample,
    bench_choose_best
);
criterion_main!(benches);
