//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full search from the opening with varying iteration caps
//! - Each search variant at a fixed cap
//! - Legal move enumeration with a warm take cache

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use games_splendor::{GameState, GameView, DEFAULT_GOAL};
use mcts::{legal_moves, MctsAgent, MctsConfig, SearchVariant, TakeCache};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn opening(players: usize) -> GameState {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    GameState::new(players, DEFAULT_GOAL, &mut rng).unwrap()
}

fn iteration_capped(iterations: u32) -> MctsConfig {
    MctsConfig::for_testing()
        .with_time_budget(Duration::from_secs(3600))
        .with_max_iterations(iterations)
}

// =============================================================================
// Full Search Benchmarks
// =============================================================================

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");
    group.sample_size(10);
    let state = opening(2);

    for iterations in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("two_players", iterations),
            &iterations,
            |b, &iterations| {
                let view = GameView::new(&state, 0);
                b.iter(|| {
                    let mut agent = MctsAgent::seeded(iteration_capped(iterations), 42);
                    black_box(agent.search(&view).unwrap().best)
                });
            },
        );
    }

    group.finish();
}

fn bench_search_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_variants");
    group.sample_size(10);
    let state = opening(3);

    for variant in SearchVariant::ALL {
        group.bench_function(variant.name(), |b| {
            let view = GameView::new(&state, 0);
            let config = iteration_capped(2).with_variant(variant);
            b.iter(|| {
                let mut agent = MctsAgent::seeded(config.clone(), 42);
                black_box(agent.search(&view).unwrap().stats.rollouts)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Move Enumeration
// =============================================================================

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_legal_moves");
    let state = opening(4);

    group.bench_function("opening_four_players", |b| {
        let view = GameView::new(&state, 0);
        let mut takes = TakeCache::new();
        b.iter(|| black_box(legal_moves(&view, &mut takes).len()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_search_iterations,
    bench_search_variants,
    bench_legal_moves,
);

criterion_main!(benches);
