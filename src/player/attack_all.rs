//! Native example strategy: spread reinforcements, attack every border.

use crate::game::{AttackMove, Board, NEUTRAL, PlayerId, ReinforcementMove};
use crate::player::{Player, PlayerResult};

/// Reinforces every owned cell evenly and attacks every non-friendly
/// neighbour of every owned cell, splitting the spare soldiers of each cell
/// (all but one) evenly across its targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackEverything {
    id: PlayerId,
}

impl AttackEverything {
    /// Create the strategy; its id is assigned by the game.
    #[must_use]
    pub const fn new() -> Self {
        Self { id: NEUTRAL }
    }
}

impl Player for AttackEverything {
    fn set_player_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    fn on_reinforcement(&self, board: &Board, quota: u32) -> PlayerResult<Vec<ReinforcementMove>> {
        let owned: Vec<_> = board.cells_controlled_by(self.id).map(|(coord, _)| coord).collect();
        let Ok(count) = u32::try_from(owned.len()) else {
            return Ok(Vec::new());
        };
        if count == 0 {
            return Ok(Vec::new());
        }

        let share = quota / count;
        let extra = quota % count;
        let moves = owned
            .into_iter()
            .zip(0..)
            .map(|(coord, idx)| {
                let amount = share + u32::from(idx < extra);
                ReinforcementMove::new(coord.row, coord.col, amount)
            })
            .filter(|mv| mv.amount > 0)
            .collect();
        Ok(moves)
    }

    fn on_attack(&self, board: &Board) -> PlayerResult<Vec<AttackMove>> {
        let mut moves = Vec::new();

        for (from, cell) in board.cells_controlled_by(self.id) {
            let spare = cell.num_soldiers() - 1;
            if spare == 0 {
                continue;
            }
            let targets: Vec<_> = board
                .neighbors(from)
                .filter(|&to| board.cell(to).is_some_and(|c| !c.is_controlled_by(self.id)))
                .collect();
            let Ok(count) = u32::try_from(targets.len()) else {
                continue;
            };
            if count == 0 {
                continue;
            }

            let share = spare / count;
            if share == 0 {
                // fewer spare soldiers than targets: one soldier each while they last
                moves.extend(
                    targets
                        .into_iter()
                        .take(usize::try_from(spare).unwrap_or(usize::MAX))
                        .map(|to| AttackMove::new(from, to, 1)),
                );
            } else {
                moves.extend(targets.into_iter().map(|to| AttackMove::new(from, to, share)));
            }
        }

        Ok(moves)
    }
}
