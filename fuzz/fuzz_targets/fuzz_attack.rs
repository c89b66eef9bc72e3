#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skirmish::{AttackMove, Attacker, Board, Cell, Coord, NullLogger, PlayerIds};

/// Structured input for attack fuzzing.
#[derive(Arbitrary, Debug)]
struct AttackInput {
    /// Board side length.
    dim: u8,
    /// Owner selector and soldiers for each cell, row-major.
    cells: Vec<(u8, u16)>,
    /// Moves for seat A as (from_row, from_col, to_row, to_col, amount).
    moves_a: Vec<(u8, u8, u8, u8, u32)>,
    /// Moves for seat B.
    moves_b: Vec<(u8, u8, u8, u8, u32)>,
}

fn to_moves(raw: &[(u8, u8, u8, u8, u32)]) -> Vec<AttackMove> {
    raw.iter()
        .take(64)
        .map(|&(fr, fc, tr, tc, amount)| {
            AttackMove::new(
                Coord::new(usize::from(fr), usize::from(fc)),
                Coord::new(usize::from(tr), usize::from(tc)),
                amount,
            )
        })
        .collect()
}

fuzz_target!(|input: AttackInput| {
    // Cap board size to keep runs fast
    let dim = usize::from(input.dim % 10).max(2);
    let mut board = Board::new(dim).unwrap();

    for (i, &(owner, soldiers)) in input.cells.iter().take(dim * dim).enumerate() {
        let owner = u32::from(owner % 3);
        let soldiers = if owner == 0 { 0 } else { u32::from(soldiers).max(1) };
        let cell = Cell::new(owner, soldiers).unwrap();
        board.set_cell(Coord::new(i / dim, i % dim), cell).unwrap();
    }

    let total_before: u64 = board.cells().map(|(_, c)| u64::from(c.num_soldiers())).sum();

    let attacker = Attacker::new(PlayerIds::default(), Arc::new(NullLogger));
    let moves_a = to_moves(&input.moves_a);
    let moves_b = to_moves(&input.moves_b);
    let reports = attacker.apply(&mut board, &moves_a, &moves_b);
    assert_eq!(reports.len(), moves_a.len() + moves_b.len());

    // Soldiers are only ever lost, and no cell is left invalid
    let total_after: u64 = board.cells().map(|(_, c)| u64::from(c.num_soldiers())).sum();
    assert!(total_after <= total_before, "{total_before} -> {total_after}");
    for (coord, cell) in board.cells() {
        assert_eq!(
            cell.is_neutral(),
            cell.num_soldiers() == 0,
            "invalid cell at {coord:?}: {cell:?}"
        );
    }
});
