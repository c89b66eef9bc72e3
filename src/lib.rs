// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Skirmish: a turn-resolution engine for a two-player conquest game.
//!
//! Two players share a square board of cells. Each round they first place
//! reinforcements on cells they control, then attack neighbouring cells.
//! The engine enforces the rules and treats player code as untrusted: every
//! call runs on a worker pool under a wall-clock budget, and a slow,
//! failing or panicking player simply makes no moves.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Game loop / RoundHandler (engine) │
//! ├─────────────────────────────────────┤
//! │   Players (native, scripted)        │
//! ├─────────────────────────────────────┤
//! │   Rules: board, reinforce, combat   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use skirmish::{AttackEverything, GameConfig, InlinePool, NullLogger, PlayerIds};
//!
//! let config = GameConfig::default();
//! let mut game = config
//!     .create_game(
//!         PlayerIds::default(),
//!         Box::new(AttackEverything::new()),
//!         Box::new(AttackEverything::new()),
//!         Arc::new(InlinePool),
//!         Arc::new(NullLogger),
//!     )
//!     .unwrap();
//! let outcome = game.run().unwrap();
//! assert!(outcome.rounds_played <= config.max_rounds);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod game;
pub mod player;

pub use config::GameConfig;
pub use engine::{DEFAULT_MOVE_TIMEOUT, Game, GameOutcome, InlinePool, RoundHandler, TaskPool};
pub use error::{AttackError, CellError, GameError, PlayerFailure, ReinforceError};
pub use events::{GameLogger, NullLogger, TracingLogger};
pub use game::{
    AttackMove, Attacker, Board, Cell, Coord, GameEndChecker, NEUTRAL, PlayerId, PlayerIds,
    ReinforcementMove, Reinforcer,
};
pub use player::{AttackEverything, Phase, Player, ScriptedPlayer};
