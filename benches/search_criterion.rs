use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bitboard_chess::game_state::chess_types::Color;
use bitboard_chess::game_state::position::Position;
use bitboard_chess::move_generation::legal_move_generator::{legal_moves, LegalMoveGenerator};
use bitboard_chess::search::board_scoring::HeuristicScorer;
use bitboard_chess::search::iterative_deepening::{SearchConfig, SearchEngine};

fn bench_select_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_move");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let position = Position::start();
    let root_moves = legal_moves(&position, Color::Light, None);

    for threads in [1usize, 4] {
        let engine = SearchEngine::new(
            LegalMoveGenerator,
            HeuristicScorer::default(),
            SearchConfig {
                threads,
                ..SearchConfig::default()
            },
        );

        for depth in [2u8, 3] {
            // Correctness guard before benchmarking.
            let chosen = engine
                .select_move(&position, None, depth, &mut StdRng::seed_from_u64(11))
                .expect("search should run");
            assert!(root_moves.contains(&chosen), "search returned a move outside the root set");

            group.bench_with_input(
                BenchmarkId::from_parameter(format!("start_d{depth}_t{threads}")),
                &depth,
                |b, &depth| {
                    b.iter(|| {
                        let mut rng = StdRng::seed_from_u64(11);
                        let mv = engine
                            .select_move(black_box(&position), None, black_box(depth), &mut rng)
                            .expect("search benchmark run should succeed");
                        black_box(mv)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_select_move);
criterion_main!(search_benches);
