#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skirmish::{Board, Cell, Coord, NullLogger, ReinforcementMove, Reinforcer};

/// Structured input for reinforcement fuzzing.
#[derive(Arbitrary, Debug)]
struct ReinforceInput {
    /// Owner selector per cell of a 5x5 board.
    owners: Vec<u8>,
    /// Moves as (row, col, amount).
    moves: Vec<(u8, u8, u32)>,
    /// Use the real quota or an arbitrary one.
    honest_quota: bool,
    /// Quota used when `honest_quota` is false.
    quota: u32,
}

fuzz_target!(|input: ReinforceInput| {
    let mut board = Board::new(5).unwrap();
    for (i, &owner) in input.owners.iter().take(25).enumerate() {
        let owner = u32::from(owner % 3);
        let cell = Cell::new(owner, u32::from(owner != 0)).unwrap();
        board.set_cell(Coord::new(i / 5, i % 5), cell).unwrap();
    }

    let quota = if input.honest_quota {
        board.player_cell_count(1)
    } else {
        input.quota
    };
    let moves: Vec<_> = input
        .moves
        .iter()
        .take(64)
        .map(|&(row, col, amount)| ReinforcementMove::new(usize::from(row), usize::from(col), amount))
        .collect();

    let before = board.clone();
    let reinforcer = Reinforcer::new(Arc::new(NullLogger));
    match reinforcer.apply(1, quota, &moves, &mut board) {
        Ok(()) => {
            assert_eq!(
                board.total_soldiers(1),
                before.total_soldiers(1) + u64::from(quota)
            );
            assert_eq!(board.total_soldiers(2), before.total_soldiers(2));
        }
        // Rejected batches leave no trace
        Err(_) => assert_eq!(board, before),
    }
});
