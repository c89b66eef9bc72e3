//! One round: bounded-time move collection, then reinforcement and attack.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::engine::TaskPool;
use crate::error::PlayerFailure;
use crate::events::GameLogger;
use crate::game::{Attacker, Board, PlayerIds, Reinforcer, Seat};
use crate::player::{Phase, Player, PlayerResult};

/// Wall-clock budget for a single player call.
pub const DEFAULT_MOVE_TIMEOUT: Duration = Duration::from_millis(500);

/// Something that can advance a board by one round.
pub trait RoundPlayer {
    /// Play one full round against `board`.
    fn play_one_round(&mut self, board: &mut Board);
}

/// What a player task sends back: the caught result and when it finished.
type Delivery<M> = (std::thread::Result<PlayerResult<Vec<M>>>, Instant);

/// A submitted player call that has not been awaited yet.
///
/// `rx` is `None` when the seat's previous call was still running and no new
/// task was started.
struct Pending<M> {
    seat: Seat,
    phase: Phase,
    deadline: Option<Instant>,
    rx: Option<Receiver<Delivery<M>>>,
}

/// Plays rounds between two players on a shared worker pool.
///
/// Player code never touches the live board. Each call gets an immutable
/// snapshot, runs as one pool task and is awaited for at most the move
/// timeout. Timeouts, errors and panics all turn into "no moves" for that
/// player and phase; late results are dropped on the floor. A seat has at
/// most one task on the pool: while an abandoned call is still running, that
/// seat's later calls are not started and count as timed out.
pub struct RoundHandler {
    ids: PlayerIds,
    players: [Arc<dyn Player>; 2],
    in_flight: [Arc<AtomicBool>; 2],
    reinforcer: Reinforcer,
    attacker: Attacker,
    pool: Arc<dyn TaskPool>,
    logger: Arc<dyn GameLogger>,
    timeout: Duration,
    round: u32,
}

impl std::fmt::Debug for RoundHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundHandler")
            .field("ids", &self.ids)
            .field("timeout", &self.timeout)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}

impl RoundHandler {
    /// Seat both players and assign their ids.
    #[must_use]
    pub fn new(
        ids: PlayerIds,
        mut player_a: Box<dyn Player>,
        mut player_b: Box<dyn Player>,
        reinforcer: Reinforcer,
        attacker: Attacker,
        pool: Arc<dyn TaskPool>,
        logger: Arc<dyn GameLogger>,
    ) -> Self {
        player_a.set_player_id(ids.id(Seat::A));
        player_b.set_player_id(ids.id(Seat::B));

        Self {
            ids,
            players: [Arc::from(player_a), Arc::from(player_b)],
            in_flight: [Arc::default(), Arc::default()],
            reinforcer,
            attacker,
            pool,
            logger,
            timeout: DEFAULT_MOVE_TIMEOUT,
            round: 0,
        }
    }

    /// Override the per-call time budget.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of rounds played so far.
    #[must_use]
    pub const fn rounds_played(&self) -> u32 {
        self.round
    }

    fn player(&self, seat: Seat) -> Arc<dyn Player> {
        Arc::clone(&self.players[Self::slot(seat)])
    }

    const fn slot(seat: Seat) -> usize {
        match seat {
            Seat::A => 0,
            Seat::B => 1,
        }
    }

    /// Run `call` for `seat` on the pool and return a handle to wait on.
    ///
    /// Nothing is spawned while the seat's previous task is still running.
    fn submit<M, F>(&self, seat: Seat, phase: Phase, board: &Arc<Board>, call: F) -> Pending<M>
    where
        M: Send + 'static,
        F: FnOnce(&dyn Player, &Board) -> PlayerResult<Vec<M>> + Send + 'static,
    {
        let busy = Arc::clone(&self.in_flight[Self::slot(seat)]);
        if busy.swap(true, Ordering::SeqCst) {
            return Pending {
                seat,
                phase,
                deadline: None,
                rx: None,
            };
        }

        let (tx, rx) = crossbeam_channel::bounded(1);
        let player = self.player(seat);
        let board = Arc::clone(board);
        let deadline = Instant::now().checked_add(self.timeout);

        self.pool.spawn(Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| call(player.as_ref(), &board)));
            // cleared before reporting so the next round never sees a stale flag
            busy.store(false, Ordering::SeqCst);
            // the receiver is gone once the round stopped waiting
            let _ = tx.send((result, Instant::now()));
        }));

        Pending {
            seat,
            phase,
            deadline,
            rx: Some(rx),
        }
    }

    /// Wait for a submitted call, degrading every failure to no moves.
    fn await_moves<M>(&self, pending: &Pending<M>) -> Vec<M> {
        let received = match (&pending.rx, pending.deadline) {
            (None, _) => Err(RecvTimeoutError::Timeout),
            (Some(rx), Some(deadline)) => rx.recv_deadline(deadline),
            (Some(rx), None) => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let failure = match received {
            Ok((_, finished)) if pending.deadline.is_some_and(|d| finished > d) => {
                PlayerFailure::TimedOut
            }
            Ok((Ok(Ok(moves)), _)) => return moves,
            Ok((Ok(Err(err)), _)) => PlayerFailure::Failed(err.to_string()),
            Ok((Err(payload), _)) => PlayerFailure::Panicked(panic_message(payload.as_ref())),
            Err(RecvTimeoutError::Timeout) => PlayerFailure::TimedOut,
            Err(RecvTimeoutError::Disconnected) => {
                PlayerFailure::Panicked("task dropped without reporting".to_string())
            }
        };

        self.logger
            .player_failed(self.ids.id(pending.seat), pending.phase, &failure);
        Vec::new()
    }

    fn reinforce(&self, seat: Seat, board: &mut Board) {
        let player = self.ids.id(seat);
        let quota = board.player_cell_count(player);
        let snapshot = Arc::new(board.clone());

        let pending = self.submit(seat, Phase::Reinforcement, &snapshot, move |p, b| {
            p.on_reinforcement(b, quota)
        });
        let moves = self.await_moves(&pending);

        // a rejected batch is reported by the reinforcer; the round goes on
        let _ = self.reinforcer.apply(player, quota, &moves, board);
    }

    fn attack(&self, board: &mut Board) {
        let snapshot = Arc::new(board.clone());

        let pending_a = self.submit(Seat::A, Phase::Attack, &snapshot, |p, b| p.on_attack(b));
        let pending_b = self.submit(Seat::B, Phase::Attack, &snapshot, |p, b| p.on_attack(b));
        let moves_a = self.await_moves(&pending_a);
        let moves_b = self.await_moves(&pending_b);

        self.attacker.apply(board, &moves_a, &moves_b);
    }
}

impl RoundPlayer for RoundHandler {
    fn play_one_round(&mut self, board: &mut Board) {
        self.round = self.round.saturating_add(1);
        self.logger.round_started(self.round);

        for seat in Seat::ALL {
            self.reinforce(seat, board);
        }
        self.attack(board);

        self.logger.round_ended(self.round, board);
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
