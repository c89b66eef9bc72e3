//! Turn resolution.
//!
//! [`Game`] owns the board and loops until the end condition holds or the
//! round budget runs out. Each round is played by a [`RoundPlayer`], normally
//! a [`RoundHandler`], which collects moves from both players on a shared
//! [`TaskPool`] under a wall-clock budget and applies them on the calling
//! thread.
//!
//! ```text
//! Game::run
//!   └─ RoundHandler::play_one_round
//!        ├─ reinforcement: A then B ── Player::on_reinforcement ─► Reinforcer
//!        └─ attack: A and B at once ── Player::on_attack ────────► Attacker
//! ```

mod pool;
mod round;
mod session;

pub use pool::{InlinePool, Task, TaskPool};
pub use round::{DEFAULT_MOVE_TIMEOUT, RoundHandler, RoundPlayer};
pub use session::{Game, GameOutcome};
