use std::sync::Arc;

use crate::controller::Executor;
use crate::core::{Clock, Supervisor, SystemClock};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for an [`Executor`] with optional subscribers and clock.
pub struct ExecutorBuilder<C> {
    ctx: Arc<C>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    shared: Option<Arc<SubscriberSet>>,
    clock: Arc<dyn Clock>,
}

impl<C: Send + Sync + 'static> ExecutorBuilder<C> {
    /// Creates a builder for actions that run against `ctx`.
    pub fn new(ctx: C) -> Self {
        Self::with_shared_context(Arc::new(ctx))
    }

    /// Like [`new`](Self::new), for a context shared with other executors.
    pub fn with_shared_context(ctx: Arc<C>) -> Self {
        Self {
            ctx,
            subscribers: Vec::new(),
            shared: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets event subscribers.
    ///
    /// Every action started by the executor reports starting, finishing,
    /// interruption and failure to them.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Reuses a subscriber set built elsewhere, e.g. by another executor.
    ///
    /// Takes precedence over [`with_subscribers`](Self::with_subscribers).
    pub fn with_subscriber_set(mut self, subs: Arc<SubscriberSet>) -> Self {
        self.shared = Some(subs);
        self
    }

    /// Sets the clock actions read through [`Execution::now`](crate::Execution::now).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the executor.
    ///
    /// Spawns subscriber workers, so must be called within a tokio runtime
    /// when subscribers were given.
    pub fn build(self) -> Executor<C> {
        let subs = match self.shared {
            Some(subs) => Some(subs),
            None if self.subscribers.is_empty() => None,
            None => Some(Arc::new(SubscriberSet::new(self.subscribers))),
        };
        Executor::from_parts(Arc::new(Supervisor::new(self.clock)), self.ctx, subs)
    }
}
