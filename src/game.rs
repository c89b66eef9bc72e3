//! Game layer.
//!
//! Implements the rules of the conquest game:
//! - Cells with self-validating ownership/soldier invariants
//! - The square board and its derived queries
//! - Reinforcement batches checked against a quota
//! - Attack validation and combat resolution
//! - End-of-game detection

mod board;
mod cell;
mod combat;
mod end_check;
mod moves;
mod reinforce;
mod seat;

pub use board::{Board, Coord, MIN_DIM};
pub use cell::Cell;
pub use combat::{
    AttackOutcome, AttackReport, Attacker, Attrition, CombatPolicy, CombatResult,
    DEFAULT_DEFENDER_BONUS_PERCENT, DefenderAdvantage,
};
pub use end_check::{EndCondition, GameEndChecker};
pub use moves::{AttackMove, ReinforcementMove};
pub use reinforce::Reinforcer;
pub use seat::{NEUTRAL, PlayerId, PlayerIds, Seat};
