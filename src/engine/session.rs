//! The game loop.

use std::sync::Arc;

use crate::engine::{RoundHandler, RoundPlayer};
use crate::error::GameError;
use crate::events::GameLogger;
use crate::game::{Board, EndCondition, GameEndChecker, NEUTRAL, PlayerId};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// The winner, or `None` when the board was emptied or the round budget
    /// ran out first.
    pub winner: Option<PlayerId>,
    /// Rounds actually played.
    pub rounds_played: u32,
}

/// A game: one board, a round budget and the machinery to play it out.
pub struct Game<R = RoundHandler, C = GameEndChecker> {
    board: Board,
    rounds: R,
    checker: C,
    max_rounds: u32,
    logger: Arc<dyn GameLogger>,
}

impl<R: std::fmt::Debug, C: std::fmt::Debug> std::fmt::Debug for Game<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("rounds", &self.rounds)
            .field("checker", &self.checker)
            .field("max_rounds", &self.max_rounds)
            .finish_non_exhaustive()
    }
}

impl<R: RoundPlayer, C: EndCondition> Game<R, C> {
    /// Create a game over `board` that plays at most `max_rounds` rounds.
    #[must_use]
    pub fn new(
        board: Board,
        rounds: R,
        checker: C,
        max_rounds: u32,
        logger: Arc<dyn GameLogger>,
    ) -> Self {
        Self {
            board,
            rounds,
            checker,
            max_rounds,
            logger,
        }
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Give up the board, e.g. to inspect the final position.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Play rounds until the end condition holds or the budget is spent.
    ///
    /// The end condition is checked once before every round and nowhere
    /// else, so a budget of `R` rounds costs at most `R` checks and a board
    /// that is already terminal plays no rounds at all. The winner is only
    /// looked up once a check reports the end; a game that runs out of
    /// rounds reports no winner.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the end condition reports a terminal board
    /// but cannot name its winner.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        self.logger.game_started(&self.board);

        let mut rounds_played = 0;
        let mut terminal = false;
        while rounds_played < self.max_rounds {
            if self.checker.is_end_of_game(&self.board) {
                terminal = true;
                break;
            }
            self.rounds.play_one_round(&mut self.board);
            rounds_played += 1;
        }

        let winner = if terminal {
            self.checker.winner_id(&self.board)?
        } else {
            NEUTRAL
        };
        self.logger.game_ended(winner);

        tracing::debug!(
            target: crate::events::LOG_TARGET,
            rounds_played,
            winner,
            terminal,
            "game.summary"
        );

        Ok(GameOutcome {
            winner: (winner != NEUTRAL).then_some(winner),
            rounds_played,
        })
    }
}
