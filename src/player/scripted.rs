//! Scripted players.
//!
//! The host supplies a [`ScriptEngine`] that evaluates player source once
//! and hands back a [`ScriptRuntime`]. [`ScriptedPlayer`] calls the phase
//! function (`onReinforcement(board, quota)` or `onAttack(board)`) with the
//! board as JSON and converts the returned array into moves.
//!
//! Every bridge failure (bad source, missing function, script error, a
//! non-array or malformed result) yields an empty move list, exactly as if
//! the player chose to do nothing.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ScriptError;
use crate::game::{AttackMove, Board, NEUTRAL, PlayerId, ReinforcementMove};
use crate::player::{Phase, Player, PlayerResult};

/// Optional hook called with the player id once ids are assigned.
pub const GAME_START_FUNCTION: &str = "onGameStart";

/// An evaluated script that functions can be called on.
pub trait ScriptRuntime: Send + Sync {
    /// Call `function` with `args`. `Ok(None)` means the function returned
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if the function is missing or raises.
    fn call(&self, function: &str, args: &[Value]) -> Result<Option<Value>, ScriptError>;
}

/// Embedded scripting engine supplied by the host.
pub trait ScriptEngine {
    /// Evaluate `source` and return the runtime its functions live in.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Evaluation`] if the source does not evaluate.
    fn evaluate(&self, source: &str) -> Result<Box<dyn ScriptRuntime>, ScriptError>;
}

/// Player whose decisions come from a script.
pub struct ScriptedPlayer {
    id: PlayerId,
    runtime: Option<Box<dyn ScriptRuntime>>,
}

impl std::fmt::Debug for ScriptedPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedPlayer")
            .field("id", &self.id)
            .field("loaded", &self.runtime.is_some())
            .finish()
    }
}

impl ScriptedPlayer {
    /// Evaluate `source` once with `engine`.
    ///
    /// A script that fails to evaluate still yields a player; it just never
    /// submits any moves.
    #[must_use]
    pub fn load(engine: &dyn ScriptEngine, source: &str) -> Self {
        let runtime = match engine.evaluate(source) {
            Ok(runtime) => Some(runtime),
            Err(err) => {
                tracing::debug!(target: "skirmish::script", error = %err, "script.load_failed");
                None
            }
        };
        Self {
            id: NEUTRAL,
            runtime,
        }
    }

    /// Whether the script evaluated successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.runtime.is_some()
    }

    /// Call the phase function and convert its result, swallowing failures.
    fn invoke<M: DeserializeOwned>(&self, phase: Phase, args: &[Value]) -> Vec<M> {
        let Some(runtime) = &self.runtime else {
            return Vec::new();
        };
        let function = phase.script_function();

        let value = match runtime.call(function, args) {
            Ok(Some(value)) => value,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::debug!(
                    target: "skirmish::script",
                    player = self.id,
                    function,
                    error = %err,
                    "script.call_failed"
                );
                return Vec::new();
            }
        };

        serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::debug!(
                target: "skirmish::script",
                player = self.id,
                function,
                error = %err,
                "script.bad_result"
            );
            Vec::new()
        })
    }
}

impl Player for ScriptedPlayer {
    fn set_player_id(&mut self, id: PlayerId) {
        self.id = id;
        if let Some(runtime) = &self.runtime {
            // the hook is optional; a missing or failing one changes nothing
            let _ = runtime.call(GAME_START_FUNCTION, &[Value::from(id)]);
        }
    }

    fn on_reinforcement(&self, board: &Board, quota: u32) -> PlayerResult<Vec<ReinforcementMove>> {
        let Ok(board) = serde_json::to_value(board) else {
            return Ok(Vec::new());
        };
        Ok(self.invoke(Phase::Reinforcement, &[board, Value::from(quota)]))
    }

    fn on_attack(&self, board: &Board) -> PlayerResult<Vec<AttackMove>> {
        let Ok(board) = serde_json::to_value(board) else {
            return Ok(Vec::new());
        };
        Ok(self.invoke(Phase::Attack, &[board]))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::game::{Coord, PlayerIds};

    type Function = Box<dyn Fn(&[Value]) -> Result<Option<Value>, ScriptError> + Send + Sync>;

    fn func(
        f: impl Fn(&[Value]) -> Result<Option<Value>, ScriptError> + Send + Sync + 'static,
    ) -> Function {
        Box::new(f)
    }

    /// Runtime whose "script" is a table of Rust closures.
    struct TableRuntime {
        functions: HashMap<&'static str, Function>,
    }

    impl ScriptRuntime for TableRuntime {
        fn call(&self, function: &str, args: &[Value]) -> Result<Option<Value>, ScriptError> {
            let f = self
                .functions
                .get(function)
                .ok_or_else(|| ScriptError::MissingFunction(function.to_string()))?;
            f(args)
        }
    }

    /// Engine that ignores the source and hands out a prepared runtime.
    struct TableEngine {
        runtime: Mutex<Option<TableRuntime>>,
    }

    impl TableEngine {
        fn new(functions: Vec<(&'static str, Function)>) -> Self {
            Self {
                runtime: Mutex::new(Some(TableRuntime {
                    functions: functions.into_iter().collect(),
                })),
            }
        }
    }

    impl ScriptEngine for TableEngine {
        fn evaluate(&self, source: &str) -> Result<Box<dyn ScriptRuntime>, ScriptError> {
            if source.contains("syntax error") {
                return Err(ScriptError::Evaluation(source.to_string()));
            }
            let runtime = self.runtime.lock().unwrap().take().unwrap();
            Ok(Box::new(runtime))
        }
    }

    fn board() -> Board {
        let mut board = Board::new(5).unwrap();
        board.populate_home_bases(PlayerIds::default(), 7);
        board
    }

    #[test]
    fn test_reinforcement_reads_bound_board() {
        let engine = TableEngine::new(vec![(
            "onReinforcement",
            func(|args| {
                let soldiers = &args[0]["configuration"][0][0]["numSoldiers"];
                Ok(Some(json!([{ "col": 0, "row": 0, "amount": soldiers }])))
            }),
        )]);
        let player = ScriptedPlayer::load(&engine, "function onReinforcement() {}");

        let moves = player.on_reinforcement(&board(), 1).unwrap();
        assert_eq!(moves, vec![ReinforcementMove::new(0, 0, 7)]);
    }

    #[test]
    fn test_quota_is_passed_to_script() {
        let engine = TableEngine::new(vec![(
            "onReinforcement",
            func(|args| Ok(Some(json!([{ "col": 4, "row": 4, "amount": args[1] }])))),
        )]);
        let player = ScriptedPlayer::load(&engine, "");
        let moves = player.on_reinforcement(&board(), 3).unwrap();
        assert_eq!(moves, vec![ReinforcementMove::new(4, 4, 3)]);
    }

    #[test]
    fn test_attack_moves_are_converted() {
        let engine = TableEngine::new(vec![(
            "onAttack",
            func(|_| {
                Ok(Some(json!([
                    { "from": { "row": 0, "col": 0 }, "to": { "row": 0, "col": 1 }, "amount": 6 }
                ])))
            }),
        )]);
        let player = ScriptedPlayer::load(&engine, "");
        let moves = player.on_attack(&board()).unwrap();
        assert_eq!(
            moves,
            vec![AttackMove::new(Coord::new(0, 0), Coord::new(0, 1), 6)]
        );
    }

    #[test]
    fn test_raising_function_yields_no_moves() {
        let engine = TableEngine::new(vec![(
            "onAttack",
            func(|_| Err(ScriptError::Raised("mega lol".to_string()))),
        )]);
        let player = ScriptedPlayer::load(&engine, "");
        assert!(player.on_attack(&board()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_function_yields_no_moves() {
        let engine = TableEngine::new(Vec::new());
        let player = ScriptedPlayer::load(&engine, "");
        assert!(player.on_attack(&board()).unwrap().is_empty());
        assert!(player.on_reinforcement(&board(), 1).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_or_empty_result_yields_no_moves() {
        let engine = TableEngine::new(vec![
            (
                "onReinforcement",
                func(|_| Ok(Some(json!({ "not": "an array" })))),
            ),
            ("onAttack", func(|_| Ok(None))),
        ]);
        let player = ScriptedPlayer::load(&engine, "");
        assert!(player.on_reinforcement(&board(), 1).unwrap().is_empty());
        assert!(player.on_attack(&board()).unwrap().is_empty());
    }

    #[test]
    fn test_script_that_fails_to_evaluate_never_moves() {
        let engine = TableEngine::new(Vec::new());
        let player = ScriptedPlayer::load(&engine, "syntax error");
        assert!(!player.is_loaded());
        assert!(player.on_attack(&board()).unwrap().is_empty());
    }

    #[test]
    fn test_game_start_hook_receives_id() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let engine = TableEngine::new(vec![(
            GAME_START_FUNCTION,
            func(move |args| {
                *sink.lock().unwrap() = args[0].as_u64();
                Ok(None)
            }),
        )]);
        let mut player = ScriptedPlayer::load(&engine, "");
        player.set_player_id(2);
        assert_eq!(*seen.lock().unwrap(), Some(2));
    }
}
