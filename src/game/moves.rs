//! Move values produced by players.
//!
//! Moves only name coordinates; they are checked against the board when a
//! [`Reinforcer`](crate::game::Reinforcer) or
//! [`Attacker`](crate::game::Attacker) applies them.

use serde::{Deserialize, Serialize};

use crate::game::Coord;

/// Add `amount` soldiers to the cell at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReinforcementMove {
    /// Target row.
    pub row: usize,
    /// Target column.
    pub col: usize,
    /// Soldiers to add.
    pub amount: u32,
}

impl ReinforcementMove {
    /// Create a new reinforcement move.
    #[must_use]
    pub const fn new(row: usize, col: usize, amount: u32) -> Self {
        Self { row, col, amount }
    }

    /// Targeted coordinate.
    #[must_use]
    pub const fn target(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// Send `amount` soldiers from `from` against `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackMove {
    /// Source cell, must be controlled by the attacker.
    pub from: Coord,
    /// Target cell, an orthogonal neighbour of `from`.
    pub to: Coord,
    /// Soldiers committed to the attack.
    pub amount: u32,
}

impl AttackMove {
    /// Create a new attack move.
    #[must_use]
    pub const fn new(from: Coord, to: Coord, amount: u32) -> Self {
        Self { from, to, amount }
    }
}
