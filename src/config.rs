//! Game configuration.
//!
//! A [`GameConfig`] carries the handful of numbers a game is set up from:
//! board size, starting soldiers, round budget, per-call time budget and the
//! worker pool size. It can be built in code or read from JSON, where every
//! field is optional:
//!
//! ```json
//! { "board_dim": 7, "max_rounds": 100, "move_timeout_ms": 250 }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{Game, RoundHandler, TaskPool};
use crate::error::{ConfigError, GameError};
use crate::events::GameLogger;
use crate::game::{Attacker, Board, GameEndChecker, MIN_DIM, PlayerIds, Reinforcer};
use crate::player::Player;

/// Settings for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_dim: usize,
    /// Soldiers placed on each home cell at the start.
    pub home_soldiers: u32,
    /// Maximum rounds before the game is called without a winner.
    pub max_rounds: u32,
    /// Wall-clock budget for each player call, in milliseconds.
    pub move_timeout_ms: u64,
    /// Threads in the worker pool built by [`GameConfig::build_pool`].
    pub worker_threads: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_dim: 5,
            home_soldiers: 20,
            max_rounds: 50,
            move_timeout_ms: 500,
            worker_threads: 2,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields
    /// and [`ConfigError::Invalid`] for unusable values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// as [`GameConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every value can be used to set up a game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_dim < MIN_DIM {
            return Err(ConfigError::Invalid(format!(
                "board_dim must be at least {MIN_DIM}, got {}",
                self.board_dim
            )));
        }
        if self.move_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "move_timeout_ms must be positive".to_string(),
            ));
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::Invalid(
                "worker_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-call time budget.
    #[must_use]
    pub const fn move_timeout(&self) -> Duration {
        Duration::from_millis(self.move_timeout_ms)
    }

    /// Build the shared worker pool.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Pool`] if rayon cannot start the threads.
    pub fn build_pool(&self) -> Result<rayon::ThreadPool, GameError> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_threads)
            .thread_name(|i| format!("skirmish-worker-{i}"))
            .build()
            .map_err(|e| GameError::Pool(e.to_string()))
    }

    /// Starting board: both home cells hold `home_soldiers`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] if `board_dim` is too small.
    pub fn initial_board(&self, ids: PlayerIds) -> Result<Board, GameError> {
        let mut board = Board::new(self.board_dim)?;
        board.populate_home_bases(ids, self.home_soldiers);
        Ok(board)
    }

    /// Wire up a ready-to-run game between `player_a` and `player_b`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] if the board cannot be built.
    pub fn create_game(
        &self,
        ids: PlayerIds,
        player_a: Box<dyn Player>,
        player_b: Box<dyn Player>,
        pool: Arc<dyn TaskPool>,
        logger: Arc<dyn GameLogger>,
    ) -> Result<Game, GameError> {
        let board = self.initial_board(ids)?;
        let rounds = RoundHandler::new(
            ids,
            player_a,
            player_b,
            Reinforcer::new(Arc::clone(&logger)),
            Attacker::new(ids, Arc::clone(&logger)),
            pool,
            Arc::clone(&logger),
        )
        .with_timeout(self.move_timeout());

        Ok(Game::new(
            board,
            rounds,
            GameEndChecker::new(ids),
            self.max_rounds,
            logger,
        ))
    }
}
