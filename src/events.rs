//! Game event reporting.
//!
//! The engine reports what happens through a [`GameLogger`] at fixed points:
//! game and round boundaries, every applied or rejected move, and every
//! player computation that degraded to an empty move list. Calls are
//! synchronous and must not block.

use std::sync::{Mutex, PoisonError};

use crate::error::{AttackError, PlayerFailure, ReinforceError};
use crate::game::{AttackMove, AttackOutcome, Board, PlayerId, ReinforcementMove};
use crate::player::Phase;

/// `tracing` target used by [`TracingLogger`].
pub const LOG_TARGET: &str = "skirmish::game";

/// Receiver of game events.
pub trait GameLogger: Send + Sync {
    /// The game is about to play its first round.
    fn game_started(&self, board: &Board);

    /// A round is starting. Rounds are numbered from 1.
    fn round_started(&self, round: u32);

    /// A round finished; `board` is its final state.
    fn round_ended(&self, round: u32, board: &Board);

    /// The game is over. `winner` is [`NEUTRAL`](crate::game::NEUTRAL) when nobody won.
    fn game_ended(&self, winner: PlayerId);

    /// One move of an accepted reinforcement batch was applied.
    fn reinforcement_applied(&self, player: PlayerId, mv: &ReinforcementMove);

    /// A whole reinforcement batch was rejected.
    fn reinforcement_rejected(&self, player: PlayerId, error: &ReinforceError);

    /// An attack move passed validation and was resolved.
    fn attack_applied(&self, player: PlayerId, mv: &AttackMove, outcome: AttackOutcome);

    /// An attack move was rejected.
    fn attack_rejected(&self, player: PlayerId, mv: &AttackMove, error: &AttackError);

    /// A player's move computation failed and was replaced by no moves.
    fn player_failed(&self, player: PlayerId, phase: Phase, failure: &PlayerFailure);
}

/// Logger that emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GameLogger for TracingLogger {
    fn game_started(&self, board: &Board) {
        tracing::info!(target: LOG_TARGET, dim = board.dim(), "game.start");
    }

    fn round_started(&self, round: u32) {
        tracing::debug!(target: LOG_TARGET, round, "round.start");
    }

    fn round_ended(&self, round: u32, board: &Board) {
        tracing::debug!(
            target: LOG_TARGET,
            round,
            board = %serde_json::to_string(board).unwrap_or_default(),
            "round.end"
        );
    }

    fn game_ended(&self, winner: PlayerId) {
        tracing::info!(target: LOG_TARGET, winner, "game.end");
    }

    fn reinforcement_applied(&self, player: PlayerId, mv: &ReinforcementMove) {
        tracing::trace!(
            target: LOG_TARGET,
            player,
            row = mv.row,
            col = mv.col,
            amount = mv.amount,
            "reinforcement.applied"
        );
    }

    fn reinforcement_rejected(&self, player: PlayerId, error: &ReinforceError) {
        tracing::debug!(target: LOG_TARGET, player, error = %error, "reinforcement.rejected");
    }

    fn attack_applied(&self, player: PlayerId, mv: &AttackMove, outcome: AttackOutcome) {
        tracing::trace!(
            target: LOG_TARGET,
            player,
            from = ?mv.from,
            to = ?mv.to,
            amount = mv.amount,
            outcome = ?outcome,
            "attack.applied"
        );
    }

    fn attack_rejected(&self, player: PlayerId, mv: &AttackMove, error: &AttackError) {
        tracing::debug!(
            target: LOG_TARGET,
            player,
            from = ?mv.from,
            to = ?mv.to,
            amount = mv.amount,
            error = %error,
            "attack.rejected"
        );
    }

    fn player_failed(&self, player: PlayerId, phase: Phase, failure: &PlayerFailure) {
        tracing::warn!(
            target: LOG_TARGET,
            player,
            phase = phase.as_str(),
            failure = %failure,
            "player.code_failed"
        );
    }
}

/// Logger that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl GameLogger for NullLogger {
    fn game_started(&self, _board: &Board) {}
    fn round_started(&self, _round: u32) {}
    fn round_ended(&self, _round: u32, _board: &Board) {}
    fn game_ended(&self, _winner: PlayerId) {}
    fn reinforcement_applied(&self, _player: PlayerId, _mv: &ReinforcementMove) {}
    fn reinforcement_rejected(&self, _player: PlayerId, _error: &ReinforceError) {}
    fn attack_applied(&self, _player: PlayerId, _mv: &AttackMove, _outcome: AttackOutcome) {}
    fn attack_rejected(&self, _player: PlayerId, _mv: &AttackMove, _error: &AttackError) {}
    fn player_failed(&self, _player: PlayerId, _phase: Phase, _failure: &PlayerFailure) {}
}

/// A recorded game event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// See [`GameLogger::game_started`].
    GameStarted,
    /// See [`GameLogger::round_started`].
    RoundStarted(u32),
    /// See [`GameLogger::round_ended`].
    RoundEnded(u32, Board),
    /// See [`GameLogger::game_ended`].
    GameEnded(PlayerId),
    /// See [`GameLogger::reinforcement_applied`].
    ReinforcementApplied(PlayerId, ReinforcementMove),
    /// See [`GameLogger::reinforcement_rejected`].
    ReinforcementRejected(PlayerId, ReinforceError),
    /// See [`GameLogger::attack_applied`].
    AttackApplied(PlayerId, AttackMove, AttackOutcome),
    /// See [`GameLogger::attack_rejected`].
    AttackRejected(PlayerId, AttackMove, AttackError),
    /// See [`GameLogger::player_failed`].
    PlayerFailed(PlayerId, Phase, PlayerFailure),
}

/// Logger that keeps every event in memory, in call order.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingLogger {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, event: GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl GameLogger for RecordingLogger {
    fn game_started(&self, _board: &Board) {
        self.push(GameEvent::GameStarted);
    }

    fn round_started(&self, round: u32) {
        self.push(GameEvent::RoundStarted(round));
    }

    fn round_ended(&self, round: u32, board: &Board) {
        self.push(GameEvent::RoundEnded(round, board.clone()));
    }

    fn game_ended(&self, winner: PlayerId) {
        self.push(GameEvent::GameEnded(winner));
    }

    fn reinforcement_applied(&self, player: PlayerId, mv: &ReinforcementMove) {
        self.push(GameEvent::ReinforcementApplied(player, *mv));
    }

    fn reinforcement_rejected(&self, player: PlayerId, error: &ReinforceError) {
        self.push(GameEvent::ReinforcementRejected(player, *error));
    }

    fn attack_applied(&self, player: PlayerId, mv: &AttackMove, outcome: AttackOutcome) {
        self.push(GameEvent::AttackApplied(player, *mv, outcome));
    }

    fn attack_rejected(&self, player: PlayerId, mv: &AttackMove, error: &AttackError) {
        self.push(GameEvent::AttackRejected(player, *mv, *error));
    }

    fn player_failed(&self, player: PlayerId, phase: Phase, failure: &PlayerFailure) {
        self.push(GameEvent::PlayerFailed(player, phase, failure.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_logger_keeps_order() {
        let logger = RecordingLogger::new();
        logger.round_started(1);
        logger.player_failed(2, Phase::Attack, &PlayerFailure::TimedOut);
        logger.game_ended(2);

        assert_eq!(
            logger.events(),
            vec![
                GameEvent::RoundStarted(1),
                GameEvent::PlayerFailed(2, Phase::Attack, PlayerFailure::TimedOut),
                GameEvent::GameEnded(2),
            ]
        );
    }

    #[test]
    fn test_tracing_logger_accepts_every_event() {
        let board = Board::new(2).unwrap();
        let logger = TracingLogger;
        logger.game_started(&board);
        logger.round_started(1);
        logger.round_ended(1, &board);
        logger.reinforcement_rejected(
            1,
            &ReinforceError::QuotaMismatch {
                expected: 1,
                supplied: 0,
            },
        );
        logger.player_failed(1, Phase::Reinforcement, &PlayerFailure::TimedOut);
        logger.game_ended(0);
    }
}
