//! # Task registry - ordered bookkeeping of active tasks.
//!
//! The registry holds `(task, execution)` pairs for every task a
//! [`Supervisor`](super::Supervisor) has started and not yet reaped.
//!
//! ## Architecture
//! ```text
//! Supervisor::start(task)
//!     ├─► Registry::add(task, exec)      (before the task runs)
//!     └─► spawn ─► task.run(exec)
//!                    └─► Registry::remove(task) ─► exec.finish()
//!
//! Executor / Timer queries:
//!     conflicts(None)         → every execution
//!     conflicts(Some(task))   → executions whose task conflicts with `task`
//!     find(id)                → first execution whose task has that id
//!     tasks()                 → snapshot of the tasks themselves
//! ```
//!
//! ## Rules
//! - Insertion order is preserved; every query answers in registry order.
//! - Identities may repeat; removal matches the task by reference, not by id.
//! - Removing an absent task is a no-op.
//! - Queries take the read lock, add/remove take the write lock.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::Execution;
use crate::tasks::Task;

/// One active task and its execution handle.
struct Entry<T> {
    task: Arc<T>,
    exec: Execution,
}

/// Thread-safe ordered registry of active tasks of one kind.
pub struct Registry<T> {
    entries: RwLock<Vec<Entry<T>>>,
}

impl<T: Task> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Appends a task with its execution handle.
    pub async fn add(&self, task: Arc<T>, exec: Execution) {
        self.entries.write().await.push(Entry { task, exec });
    }

    /// Removes the first entry holding this very task (by reference).
    pub async fn remove(&self, task: &Arc<T>) {
        let mut entries = self.entries.write().await;
        if let Some(pos) = entries.iter().position(|e| Arc::ptr_eq(&e.task, task)) {
            entries.remove(pos);
        }
    }

    /// Executions of tasks conflicting with `task`, or every execution for `None`.
    pub async fn conflicts(&self, task: Option<&T>) -> Vec<Execution> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| task.is_none_or(|t| e.task.conflicts_with(t)))
            .map(|e| e.exec.clone())
            .collect()
    }

    /// Execution of the first task with the given identity.
    pub async fn find(&self, id: &str) -> Option<Execution> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|e| e.task.task_id() == id)
            .map(|e| e.exec.clone())
    }

    /// Snapshot of the active tasks in registry order.
    pub async fn tasks(&self) -> Vec<Arc<T>> {
        let entries = self.entries.read().await;
        entries.iter().map(|e| Arc::clone(&e.task)).collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T: Task> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
