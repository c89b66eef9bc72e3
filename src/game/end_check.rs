//! End-of-game detection and winner lookup.

use crate::error::GameError;
use crate::game::{Board, NEUTRAL, PlayerId, PlayerIds, Seat};

/// Decides whether a board is terminal and who won it.
///
/// The game loop talks to this through a trait so it can be driven by a
/// scripted stand-in in tests.
pub trait EndCondition {
    /// Whether the game on `board` is over.
    fn is_end_of_game(&self, board: &Board) -> bool;

    /// Winner of a terminal board, [`NEUTRAL`] when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameInProgress`] if `board` is not terminal.
    fn winner_id(&self, board: &Board) -> Result<PlayerId, GameError>;
}

/// Standard end rule: the game ends when the board is empty or when one
/// player has no soldiers left.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameEndChecker {
    ids: PlayerIds,
}

impl GameEndChecker {
    /// Create a checker for the given seats.
    #[must_use]
    pub const fn new(ids: PlayerIds) -> Self {
        Self { ids }
    }

    /// Soldier totals for seat A and seat B.
    fn totals(&self, board: &Board) -> (u64, u64) {
        (
            board.total_soldiers(self.ids.id(Seat::A)),
            board.total_soldiers(self.ids.id(Seat::B)),
        )
    }
}

impl EndCondition for GameEndChecker {
    fn is_end_of_game(&self, board: &Board) -> bool {
        if board.is_empty() {
            return true;
        }
        let (a, b) = self.totals(board);
        (a == 0) != (b == 0)
    }

    fn winner_id(&self, board: &Board) -> Result<PlayerId, GameError> {
        if board.is_empty() {
            return Ok(NEUTRAL);
        }
        match self.totals(board) {
            (0, b) if b > 0 => Ok(self.ids.id(Seat::B)),
            (a, 0) if a > 0 => Ok(self.ids.id(Seat::A)),
            _ => Err(GameError::GameInProgress),
        }
    }
}
