//! Worker pools that run player computations.

use std::sync::Arc;

/// A unit of work handed to a [`TaskPool`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Executor for player move computations.
///
/// The pool is created once by the caller and shared by every round of a
/// game.
pub trait TaskPool: Send + Sync {
    /// Run `task`, now or later, on some thread.
    fn spawn(&self, task: Task);
}

impl TaskPool for rayon::ThreadPool {
    fn spawn(&self, task: Task) {
        rayon::ThreadPool::spawn(self, task);
    }
}

impl<P: TaskPool + ?Sized> TaskPool for Arc<P> {
    fn spawn(&self, task: Task) {
        (**self).spawn(task);
    }
}

/// Runs every task synchronously on the calling thread.
///
/// Move collection stays deterministic, which makes this the pool of choice
/// for tests and single-threaded hosts. Time budgets still apply: a result
/// that took too long is discarded after the fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlinePool;

impl TaskPool for InlinePool {
    fn spawn(&self, task: Task) {
        task();
    }
}
