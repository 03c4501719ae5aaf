//! Match benchmarks for arena_core.
//!
//! Run with: `cargo bench -p arena_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use arena_core::prelude::*;
use arena_test_utils::fixtures::{classic_roster, duel};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

/// Full seeded matches and single rounds.
pub fn simulation_benchmark(c: &mut Criterion) {
    c.bench_function("classic_match_seed_42", |b| {
        b.iter_batched(
            classic_roster,
            |roster| {
                let mut arena = Arena::with_config(roster, MatchConfig::capped(10_000));
                black_box(arena.run(&mut SeededLuck::new(42)))
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("warrior_vs_mage_duel", |b| {
        b.iter_batched(
            || duel(Archetype::Warrior, Archetype::Mage, 4),
            |roster| {
                let mut arena = Arena::with_config(roster, MatchConfig::capped(10_000));
                black_box(arena.run(&mut SeededLuck::new(7)))
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("classic_single_round", |b| {
        b.iter_batched(
            || (Arena::new(classic_roster()), SeededLuck::new(1)),
            |(mut arena, mut luck)| black_box(arena.step_round(&mut luck)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, simulation_benchmark);
criterion_main!(benches);
