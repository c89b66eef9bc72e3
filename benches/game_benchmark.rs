//! Benchmarks for running complete games and single rule applications.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use skirmish::game::Seat;
use skirmish::{
    AttackEverything, Attacker, Board, GameConfig, InlinePool, NullLogger, Player, PlayerIds,
};

fn run_inline(config: &GameConfig) -> skirmish::GameOutcome {
    let mut game = config
        .create_game(
            PlayerIds::default(),
            Box::new(AttackEverything::new()),
            Box::new(AttackEverything::new()),
            Arc::new(InlinePool),
            Arc::new(NullLogger),
        )
        .unwrap();
    game.run().unwrap()
}

fn bench_single_game(c: &mut Criterion) {
    let config = GameConfig::default();

    c.bench_function("single_game_inline", |b| {
        b.iter(|| black_box(run_inline(black_box(&config))));
    });
}

fn bench_large_board(c: &mut Criterion) {
    let config = GameConfig {
        board_dim: 16,
        max_rounds: 100,
        ..GameConfig::default()
    };

    c.bench_function("large_board_inline", |b| {
        b.iter(|| black_box(run_inline(black_box(&config))));
    });
}

fn bench_thread_pool_game(c: &mut Criterion) {
    // Same game on the worker pool, to see the cost of task hand-off
    let config = GameConfig::default();
    let pool: Arc<rayon::ThreadPool> = Arc::new(config.build_pool().unwrap());

    c.bench_function("single_game_pool", |b| {
        b.iter(|| {
            let mut game = config
                .create_game(
                    PlayerIds::default(),
                    Box::new(AttackEverything::new()),
                    Box::new(AttackEverything::new()),
                    pool.clone(),
                    Arc::new(NullLogger),
                )
                .unwrap();
            black_box(game.run().unwrap())
        });
    });
}

fn bench_attack_phase(c: &mut Criterion) {
    // Fully populated board: every cell borders the enemy or a friend
    let ids = PlayerIds::default();
    let board = Board::populated(12, ids, 30).unwrap();
    let mut a = AttackEverything::new();
    let mut b_player = AttackEverything::new();
    a.set_player_id(ids.id(Seat::A));
    b_player.set_player_id(ids.id(Seat::B));
    let moves_a = a.on_attack(&board).unwrap();
    let moves_b = b_player.on_attack(&board).unwrap();
    let attacker = Attacker::new(ids, Arc::new(NullLogger));

    c.bench_function("attack_phase_12x12", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let reports = attacker.apply(&mut board, black_box(&moves_a), black_box(&moves_b));
            black_box((board, reports))
        });
    });
}

criterion_group!(
    benches,
    bench_single_game,
    bench_large_board,
    bench_thread_pool_game,
    bench_attack_phase
);
criterion_main!(benches);
