use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gomoku_mcts::{compute_next_move, BoardState, Player, SearchConfig};

#[path = "../tests/common/mod.rs"]
#[allow(dead_code)]
mod common;

use common::{grid, LineGame};

fn search_benchmark(c: &mut Criterion) {
    let state = BoardState::new(
        grid(&[
            "...........",
            "...........",
            "...........",
            "....w......",
            "....bb.....",
            "....wbw....",
            "......b....",
            "...........",
            "...........",
            "...........",
            "...........",
        ]),
        Player::White,
    );
    let game = LineGame::new(5);

    c.bench_function("uct_search_1000_iterations", |b| {
        b.iter(|| compute_next_move(black_box(&state), &game, SearchConfig::default().with_seed(1)))
    });
}

criterion_group!(benches, search_benchmark);
criterion_main!(benches);
