//! Reinforcement phase: quota-checked, all-or-nothing soldier placement.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ReinforceError;
use crate::events::GameLogger;
use crate::game::{Board, Cell, Coord, PlayerId, ReinforcementMove};

/// Validates and applies one player's reinforcement batch.
#[derive(Clone)]
pub struct Reinforcer {
    logger: Arc<dyn GameLogger>,
}

impl std::fmt::Debug for Reinforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reinforcer").finish_non_exhaustive()
    }
}

impl Reinforcer {
    /// Create a reinforcer reporting to `logger`.
    #[must_use]
    pub fn new(logger: Arc<dyn GameLogger>) -> Self {
        Self { logger }
    }

    /// Apply `moves` for `player` against `quota`.
    ///
    /// Every target must be controlled by `player` and the amounts must add
    /// up to exactly `quota`. Validation runs over the whole batch before any
    /// cell changes, so a rejected batch leaves the board untouched. Several
    /// moves may target the same cell; their amounts add up.
    ///
    /// # Errors
    ///
    /// Returns [`ReinforceError`] describing the first problem found. The
    /// rejection is also reported to the logger, once per batch.
    pub fn apply(
        &self,
        player: PlayerId,
        quota: u32,
        moves: &[ReinforcementMove],
        board: &mut Board,
    ) -> Result<(), ReinforceError> {
        let result = validate(player, quota, moves, board).and_then(|()| place(moves, board));
        match result {
            Ok(()) => {
                for mv in moves {
                    self.logger.reinforcement_applied(player, mv);
                }
            }
            Err(err) => self.logger.reinforcement_rejected(player, &err),
        }
        result
    }
}

fn validate(
    player: PlayerId,
    quota: u32,
    moves: &[ReinforcementMove],
    board: &Board,
) -> Result<(), ReinforceError> {
    if let Some(mv) = moves.iter().find(|mv| {
        !board
            .cell(mv.target())
            .is_some_and(|cell| cell.is_controlled_by(player))
    }) {
        return Err(ReinforceError::NotControlled {
            row: mv.row,
            col: mv.col,
        });
    }

    let supplied: u64 = moves.iter().map(|mv| u64::from(mv.amount)).sum();
    if supplied != u64::from(quota) {
        return Err(ReinforceError::QuotaMismatch {
            expected: quota,
            supplied,
        });
    }

    let mut added: HashMap<Coord, u64> = HashMap::new();
    for mv in moves {
        let total = added.entry(mv.target()).or_default();
        *total += u64::from(mv.amount);
        let current = board.cell(mv.target()).map_or(0, Cell::num_soldiers);
        if u64::from(current) + *total > u64::from(u32::MAX) {
            return Err(ReinforceError::SoldierOverflow {
                row: mv.row,
                col: mv.col,
            });
        }
    }
    Ok(())
}

/// Add every amount to its target. Targets were validated as controlled
/// and with room for the soldiers.
fn place(moves: &[ReinforcementMove], board: &mut Board) -> Result<(), ReinforceError> {
    for mv in moves {
        if let Some(cell) = board.cell_mut(mv.target()) {
            let soldiers = cell
                .num_soldiers()
                .checked_add(mv.amount)
                .ok_or(ReinforceError::SoldierOverflow {
                    row: mv.row,
                    col: mv.col,
                })?;
            cell.update_num_soldiers(soldiers)?;
        }
    }
    Ok(())
}
