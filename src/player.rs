//! Player decision logic.
//!
//! A [`Player`] turns a read-only board into moves for one phase. Player
//! code is untrusted: the round handler runs it on the worker pool under a
//! time budget, and any error, panic or timeout becomes an empty move list.
//!
//! Two variants ship with the crate:
//! - [`AttackEverything`], a native strategy
//! - [`ScriptedPlayer`], an adapter over a host-supplied [`ScriptEngine`]

mod attack_all;
mod scripted;

pub use attack_all::AttackEverything;
pub use scripted::{GAME_START_FUNCTION, ScriptEngine, ScriptRuntime, ScriptedPlayer};

use serde::{Deserialize, Serialize};

use crate::game::{AttackMove, Board, PlayerId, ReinforcementMove};

/// Error type player code may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for player move computations.
pub type PlayerResult<T> = Result<T, BoxError>;

/// The two per-round stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players place their quota of soldiers.
    Reinforcement,
    /// Players attack neighbouring cells.
    Attack,
}

impl Phase {
    /// Stable lowercase name, used in log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Reinforcement => "reinforcement",
            Phase::Attack => "attack",
        }
    }

    /// Name of the script function called for this phase.
    #[must_use]
    pub const fn script_function(self) -> &'static str {
        match self {
            Phase::Reinforcement => "onReinforcement",
            Phase::Attack => "onAttack",
        }
    }
}

/// Decision-making capability of one seat.
///
/// Implementations only read the board; all mutation happens in the engine
/// after the moves are collected. Calls may run on a worker thread and may
/// be abandoned if they exceed the time budget.
pub trait Player: Send + Sync {
    /// Receive this player's id. Called exactly once, before any round.
    fn set_player_id(&mut self, id: PlayerId);

    /// Place `quota` soldiers on owned cells.
    ///
    /// # Errors
    ///
    /// Any error is logged and treated as "no moves".
    fn on_reinforcement(&self, board: &Board, quota: u32) -> PlayerResult<Vec<ReinforcementMove>>;

    /// Choose attacks for this round.
    ///
    /// # Errors
    ///
    /// Any error is logged and treated as "no moves".
    fn on_attack(&self, board: &Board) -> PlayerResult<Vec<AttackMove>>;
}
