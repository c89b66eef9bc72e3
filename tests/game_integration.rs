//! Full-game integration tests.
//!
//! These tests play complete games through the public API and check that
//! misbehaving players never stop a game from finishing.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};
use skirmish::error::ScriptError;
use skirmish::events::{GameEvent, RecordingLogger};
use skirmish::player::{PlayerResult, ScriptEngine, ScriptRuntime};
use skirmish::{
    AttackEverything, AttackMove, Board, GameConfig, GameLogger, InlinePool, NEUTRAL, Phase,
    Player, PlayerFailure, PlayerId, PlayerIds, ReinforcementMove, ScriptedPlayer, TaskPool,
    TracingLogger,
};

/// A player that never submits anything.
#[derive(Debug, Clone, Copy)]
struct Idle;

impl Player for Idle {
    fn set_player_id(&mut self, _id: PlayerId) {}

    fn on_reinforcement(&self, _board: &Board, _quota: u32) -> PlayerResult<Vec<ReinforcementMove>> {
        Ok(Vec::new())
    }

    fn on_attack(&self, _board: &Board) -> PlayerResult<Vec<AttackMove>> {
        Ok(Vec::new())
    }
}

/// A player whose code blows up in both phases.
#[derive(Debug, Clone, Copy)]
struct Crashing;

impl Player for Crashing {
    fn set_player_id(&mut self, _id: PlayerId) {}

    fn on_reinforcement(&self, _board: &Board, _quota: u32) -> PlayerResult<Vec<ReinforcementMove>> {
        Err("mega lol".into())
    }

    fn on_attack(&self, _board: &Board) -> PlayerResult<Vec<AttackMove>> {
        panic!("attack code crashed")
    }
}

/// A player that always overruns its time budget.
#[derive(Debug, Clone, Copy)]
struct Sleepy(Duration);

impl Player for Sleepy {
    fn set_player_id(&mut self, _id: PlayerId) {}

    fn on_reinforcement(&self, _board: &Board, _quota: u32) -> PlayerResult<Vec<ReinforcementMove>> {
        thread::sleep(self.0);
        Ok(Vec::new())
    }

    fn on_attack(&self, _board: &Board) -> PlayerResult<Vec<AttackMove>> {
        thread::sleep(self.0);
        Ok(Vec::new())
    }
}

fn play(
    config: &GameConfig,
    a: Box<dyn Player>,
    b: Box<dyn Player>,
    pool: Arc<dyn TaskPool>,
) -> (skirmish::GameOutcome, Board, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::new());
    let as_logger: Arc<dyn GameLogger> = logger.clone();
    let mut game = config
        .create_game(PlayerIds::default(), a, b, pool, as_logger)
        .unwrap();
    let outcome = game.run().unwrap();
    (outcome, game.into_board(), logger)
}

fn failures_of(logger: &RecordingLogger, player: PlayerId) -> Vec<(Phase, PlayerFailure)> {
    logger
        .events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::PlayerFailed(id, phase, failure) if id == player => Some((phase, failure)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_mirror_match_finishes_within_budget() {
    let config = GameConfig::default();
    let (outcome, board, logger) = play(
        &config,
        Box::new(AttackEverything::new()),
        Box::new(AttackEverything::new()),
        Arc::new(InlinePool),
    );

    assert!(outcome.rounds_played <= config.max_rounds);
    assert!(board.cells().all(|(_, c)| c.is_neutral() || c.num_soldiers() >= 1));
    let events = logger.events();
    assert_eq!(events.first(), Some(&GameEvent::GameStarted));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameEnded(outcome.winner.unwrap_or(NEUTRAL)))
    );
}

#[test]
fn test_inline_games_are_deterministic() {
    let config = GameConfig {
        max_rounds: 20,
        ..GameConfig::default()
    };
    let run = || {
        play(
            &config,
            Box::new(AttackEverything::new()),
            Box::new(AttackEverything::new()),
            Arc::new(InlinePool),
        )
    };
    let (first, board_1, _) = run();
    let (second, board_2, _) = run();

    assert_eq!(first, second);
    assert_eq!(board_1, board_2);
}

#[test]
fn test_active_player_beats_idle_player() {
    let config = GameConfig {
        max_rounds: 100,
        ..GameConfig::default()
    };
    let (outcome, board, logger) = play(
        &config,
        Box::new(AttackEverything::new()),
        Box::new(Idle),
        Arc::new(InlinePool),
    );

    assert_eq!(outcome.winner, Some(1));
    assert_eq!(board.player_cell_count(2), 0);
    assert!(outcome.rounds_played < config.max_rounds);
    // an empty batch never meets a non-zero quota
    assert!(
        logger
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::ReinforcementRejected(2, _)))
    );
}

#[test]
fn test_crashing_player_loses_without_stopping_the_game() {
    let config = GameConfig {
        max_rounds: 100,
        ..GameConfig::default()
    };
    let (outcome, _, logger) = play(
        &config,
        Box::new(AttackEverything::new()),
        Box::new(Crashing),
        Arc::new(InlinePool),
    );

    assert_eq!(outcome.winner, Some(1));
    let failures = failures_of(&logger, 2);
    assert!(failures.contains(&(
        Phase::Reinforcement,
        PlayerFailure::Failed("mega lol".to_string())
    )));
    assert!(failures.contains(&(
        Phase::Attack,
        PlayerFailure::Panicked("attack code crashed".to_string())
    )));
    assert!(failures_of(&logger, 1).is_empty());
}

#[test]
fn test_slow_player_times_out_on_worker_pool() {
    let config = GameConfig {
        max_rounds: 3,
        move_timeout_ms: 20,
        worker_threads: 8,
        ..GameConfig::default()
    };
    let pool = Arc::new(config.build_pool().unwrap());
    let (outcome, _, logger) = play(
        &config,
        Box::new(AttackEverything::new()),
        Box::new(Sleepy(Duration::from_millis(200))),
        pool,
    );

    assert_eq!(outcome.rounds_played, 3);
    let failures = failures_of(&logger, 2);
    assert_eq!(failures.len(), 6);
    assert!(
        failures
            .iter()
            .all(|(_, failure)| *failure == PlayerFailure::TimedOut)
    );
}

#[test]
fn test_hung_player_does_not_starve_small_pool() {
    let config = GameConfig {
        max_rounds: 4,
        move_timeout_ms: 100,
        worker_threads: 2,
        ..GameConfig::default()
    };
    let pool = Arc::new(config.build_pool().unwrap());
    let (outcome, board, logger) = play(
        &config,
        Box::new(AttackEverything::new()),
        Box::new(Sleepy(Duration::from_secs(3600))),
        pool,
    );

    assert_eq!(outcome.rounds_played, 4);
    assert!(failures_of(&logger, 1).is_empty());
    let failures = failures_of(&logger, 2);
    assert_eq!(failures.len(), 8);
    assert!(
        failures
            .iter()
            .all(|(_, failure)| *failure == PlayerFailure::TimedOut)
    );
    assert!(board.player_cell_count(1) > 1);
}

#[test]
fn test_tracing_logger_game() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = GameConfig {
        max_rounds: 5,
        ..GameConfig::default()
    };
    let mut game = config
        .create_game(
            PlayerIds::default(),
            Box::new(AttackEverything::new()),
            Box::new(Crashing),
            Arc::new(InlinePool),
            Arc::new(TracingLogger),
        )
        .unwrap();
    assert_eq!(game.run().unwrap().rounds_played, 5);
}

/// Script runtime that stands in for an embedded interpreter: it places the
/// whole quota on the first owned cell it finds in the board data and sends
/// malformed attack data.
#[derive(Debug, Default)]
struct StackingRuntime {
    id: Mutex<u64>,
}

impl ScriptRuntime for StackingRuntime {
    fn call(&self, function: &str, args: &[Value]) -> Result<Option<Value>, ScriptError> {
        match function {
            "onGameStart" => {
                *self.id.lock().unwrap() = args[0].as_u64().unwrap();
                Ok(None)
            }
            "onReinforcement" => {
                let id = *self.id.lock().unwrap();
                let rows = args[0]["configuration"].as_array().unwrap();
                for (row, cells) in rows.iter().enumerate() {
                    for (col, cell) in cells.as_array().unwrap().iter().enumerate() {
                        if cell["controllingPlayerId"] == id {
                            return Ok(Some(
                                json!([{ "row": row, "col": col, "amount": args[1] }]),
                            ));
                        }
                    }
                }
                Ok(Some(json!([])))
            }
            "onAttack" => Ok(Some(json!("not a move list"))),
            other => Err(ScriptError::MissingFunction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct StackingEngine;

impl ScriptEngine for StackingEngine {
    fn evaluate(&self, _source: &str) -> Result<Box<dyn ScriptRuntime>, ScriptError> {
        Ok(Box::new(StackingRuntime::default()))
    }
}

#[test]
fn test_scripted_player_takes_part_in_game() {
    let config = GameConfig {
        max_rounds: 4,
        ..GameConfig::default()
    };
    let scripted = ScriptedPlayer::load(&StackingEngine, "function onReinforcement() {}");
    let (outcome, board, logger) = play(
        &config,
        Box::new(Idle),
        Box::new(scripted),
        Arc::new(InlinePool),
    );

    assert_eq!(outcome.rounds_played, 4);
    // one soldier per round on the home cell, attacks ignored
    assert_eq!(board.total_soldiers(2), 24);
    assert_eq!(board.player_cell_count(2), 1);
    assert!(failures_of(&logger, 2).is_empty());
    assert!(
        logger
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::ReinforcementApplied(2, _)))
    );
}
