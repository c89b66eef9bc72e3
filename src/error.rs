//! Error types for the turn-resolution engine.
//!
//! Each enum maps to one rejection scope: a single cell mutation, a whole
//! reinforcement batch, a single attack move, or a misuse of the game API.

use std::path::PathBuf;

use crate::game::PlayerId;

/// A cell mutation that would break the ownership/soldier invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    /// A neutral cell was given a non-zero soldier count.
    #[error("neutral cell containing soldiers")]
    NeutralWithSoldiers,
    /// A controlled cell was given zero soldiers.
    #[error("controlled cell with zero soldiers")]
    ControlledWithoutSoldiers,
}

/// Board construction or addressing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Boards need room for two distinct home cells.
    #[error("board dimension {0} is too small (minimum 2)")]
    DimensionTooSmall(usize),
    /// A coordinate outside the grid.
    #[error("cell ({row}, {col}) is outside a {dim}x{dim} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board dimension.
        dim: usize,
    },
}

/// Rejection of a whole reinforcement batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReinforceError {
    /// A move targets a cell the player does not control (or that does not exist).
    #[error("cannot reinforce a cell you don't control: ({row}, {col})")]
    NotControlled {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// The batch does not add up to the player's quota.
    #[error("reinforcement quota mismatch: expected {expected} soldiers, supplied {supplied}")]
    QuotaMismatch {
        /// The player's quota for this round.
        expected: u32,
        /// Sum of all move amounts.
        supplied: u64,
    },
    /// The batch would push a cell past the largest soldier count.
    #[error("reinforcing ({row}, {col}) would overflow its soldier count")]
    SoldierOverflow {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// Applying the batch would break a cell invariant.
    #[error(transparent)]
    Cell(#[from] CellError),
}

/// Rejection of a single attack move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    /// The move commits no soldiers.
    #[error("attack commits no soldiers")]
    EmptyAttack,
    /// Source or target lies outside the board.
    #[error(transparent)]
    OutOfBounds(#[from] BoardError),
    /// Target is not an orthogonal neighbour of the source.
    #[error("target is not adjacent to the source cell")]
    NotAdjacent,
    /// The issuing player does not control the source cell.
    #[error("cannot attack from a cell you don't control")]
    NotControlled,
    /// The source would be left without a defender.
    #[error("source cell holds {available} soldiers, cannot commit {committed}")]
    InsufficientSoldiers {
        /// Soldiers currently on the source cell.
        available: u32,
        /// Soldiers the move tried to commit.
        committed: u32,
    },
    /// Moving into a friendly cell would overflow its soldier count.
    #[error("target cell cannot hold that many soldiers")]
    SoldierOverflow,
    /// Resolving the move would break a cell invariant.
    #[error(transparent)]
    Cell(#[from] CellError),
}

/// Why a player's move computation produced no moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerFailure {
    /// The computation did not finish inside the time budget.
    #[error("move computation timed out")]
    TimedOut,
    /// The computation panicked.
    #[error("move computation panicked: {0}")]
    Panicked(String),
    /// The computation returned an error.
    #[error("move computation failed: {0}")]
    Failed(String),
}

/// Failure inside the scripting bridge. Never leaves the scripted player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// The script source could not be evaluated.
    #[error("script evaluation failed: {0}")]
    Evaluation(String),
    /// The script does not define the requested function.
    #[error("script does not define {0}")]
    MissingFunction(String),
    /// The function raised an error while running.
    #[error("script function raised: {0}")]
    Raised(String),
}

/// Misuse of the game API or invalid game setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The winner was requested while both players still hold soldiers.
    #[error("cannot get winner for an ongoing game")]
    GameInProgress,
    /// Seat ids must be distinct and non-zero.
    #[error("invalid player ids {a} and {b}: ids must be distinct and non-zero")]
    InvalidPlayerIds {
        /// Id requested for seat A.
        a: PlayerId,
        /// Id requested for seat B.
        b: PlayerId,
    },
    /// Board construction failed.
    #[error(transparent)]
    Board(#[from] BoardError),
    /// The worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    Pool(String),
}

/// Failure to load or validate a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The config is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The config parsed but holds unusable values.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_error_messages() {
        assert_eq!(
            CellError::NeutralWithSoldiers.to_string(),
            "neutral cell containing soldiers"
        );
        assert_eq!(
            CellError::ControlledWithoutSoldiers.to_string(),
            "controlled cell with zero soldiers"
        );
    }

    #[test]
    fn test_quota_mismatch_names_both_totals() {
        let err = ReinforceError::QuotaMismatch {
            expected: 3,
            supplied: 5,
        };
        let message = err.to_string();
        assert!(message.contains("expected 3"));
        assert!(message.contains("supplied 5"));
    }

    #[test]
    fn test_game_in_progress_message() {
        assert_eq!(
            GameError::GameInProgress.to_string(),
            "cannot get winner for an ongoing game"
        );
    }
}
