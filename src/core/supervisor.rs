//! # Supervisor: runs tasks, tracks them in a registry, pauses and shuts down.
//!
//! The [`Supervisor`] is the generic multi-task coordinator underneath both the
//! [`Executor`](crate::Executor) and the [`Timer`](crate::Timer). It knows
//! nothing about lights: admission decisions are made by its owner, the
//! supervisor only starts what it is handed, as long as it is running.
//!
//! ## Lifecycle
//! ```text
//! start(task)
//!   ├─ paused or closed?  → None
//!   ├─ exec = Execution(runtime_token.child_token())
//!   ├─ registry.add(task, exec)
//!   └─ spawn ─► run_once(task, exec)
//!               registry.remove(task)
//!               exec.finish()            → done() resolves
//!
//! end_all() → end + await every execution
//! pause()   → paused = true; end_all()
//! resume()  → paused = false
//! close()   → closed = true; runtime_token.cancel(); end_all()
//! ```
//!
//! ## Rules
//! - A task is visible in the registry from the moment `start` returns until
//!   just before its `done()` resolves.
//! - `close` is idempotent and permanent; `pause`/`resume` may repeat.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::core::{Clock, Execution, Registry, SystemClock, runner};
use crate::tasks::Task;

#[derive(Default)]
struct State {
    paused: bool,
    closed: bool,
}

/// Generic coordinator for tasks of one kind.
pub struct Supervisor<T> {
    registry: Arc<Registry<T>>,
    state: Mutex<State>,
    runtime_token: CancellationToken,
    clock: Arc<dyn Clock>,
}

impl<T: Task> Supervisor<T> {
    /// Creates a running supervisor reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            state: Mutex::new(State::default()),
            runtime_token: CancellationToken::new(),
            clock,
        }
    }

    /// The registry of active tasks.
    pub fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Starts `task` in the background.
    ///
    /// Returns `None` when the supervisor is paused or closed.
    pub async fn start(&self, task: Arc<T>) -> Option<Execution> {
        let state = self.state.lock().await;
        if state.paused || state.closed {
            tracing::debug!(
                task = %task.task_id(),
                paused = state.paused,
                closed = state.closed,
                "start refused"
            );
            return None;
        }

        let exec = Execution::new(self.runtime_token.child_token(), Arc::clone(&self.clock));
        self.registry.add(Arc::clone(&task), exec.clone()).await;
        drop(state);

        let registry = Arc::clone(&self.registry);
        let handle = exec.clone();
        tokio::spawn(async move {
            runner::run_once(task.as_ref(), &handle).await;
            registry.remove(&task).await;
            handle.finish();
        });

        Some(exec)
    }

    /// Ends every task conflicting with `task` and waits for them to stop.
    pub async fn end_conflicting(&self, task: &T) {
        let execs = self.registry.conflicts(Some(task)).await;
        end_and_wait(&execs).await;
    }

    /// Ends the first task with identity `id` and waits for it to stop.
    ///
    /// Returns `false` if no such task is active.
    pub async fn stop(&self, id: &str) -> bool {
        match self.registry.find(id).await {
            Some(exec) => {
                end_and_wait(std::slice::from_ref(&exec)).await;
                true
            }
            None => false,
        }
    }

    /// Ends every running task and waits for them to stop.
    pub async fn end_all(&self) {
        let execs = self.registry.conflicts(None).await;
        end_and_wait(&execs).await;
    }

    /// Refuses new starts, then ends every running task and waits for it.
    pub async fn pause(&self) {
        self.state.lock().await.paused = true;
        self.end_all().await;
    }

    /// Accepts new starts again. A closed supervisor stays closed.
    pub async fn resume(&self) {
        self.state.lock().await.paused = false;
    }

    /// Permanently stops the supervisor and waits for every task.
    pub async fn close(&self) {
        {
            let mut state = self.state.lock().await;
            if state.closed {
                return;
            }
            state.closed = true;
        }
        self.runtime_token.cancel();
        self.end_all().await;
    }
}

impl<T: Task> Default for Supervisor<T> {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

/// Requests cancellation of every execution, then waits for all of them.
async fn end_and_wait(execs: &[Execution]) {
    for exec in execs {
        exec.end();
    }
    for exec in execs {
        exec.done().await;
    }
}
