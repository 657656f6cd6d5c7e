//! # Stack: temporary override of every light, then restore.
//!
//! Two executors share the lights: **base** runs the automated actions,
//! **extra** runs whatever an operator starts while overriding. One control
//! loop switches between them.
//!
//! ## Protocol
//! ```text
//!          ┌──────────── Base phase ◄────────────┐
//!          │ (base resumed, extra paused)        │
//!   push() │                                     │ pop()
//!          ▼                                     │
//!   pause base                              pause extra
//!   sleep(settle_delay)                     restore? → run it once on `lights`
//!   restore = snapshot(lights)              resume base
//!   resume extra                                 ▲
//!          │                                     │
//!          └──────────► Extra phase ─────────────┘
//!                    (extra resumed, base paused)
//! ```
//!
//! ## Rules
//! - Requests are handled one at a time; `push`/`pop` return once their phase is done.
//! - A push during the Extra phase waits for the next pop, and a pop during the
//!   Base phase waits for the next push. Waiting requests are served in order.
//! - Snapshot and restore failures (errors or panics) are logged and reported
//!   as events; they never stop the loop. A failed snapshot means the matching
//!   pop restores nothing.

use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::controller::{Executor, Snapshot, StackError};
use crate::core::{Execution, panic_message};
use crate::error::TaskError;
use crate::events::{Event, EventKind};
use crate::lights::LightSet;
use crate::tasks::ActionRef;

enum Request {
    Push(oneshot::Sender<()>),
    Pop(oneshot::Sender<()>),
}

enum Phase<C> {
    Base,
    Extra { restore: Option<ActionRef<C>> },
}

/// Cheaply cloneable handle to the override control loop.
#[derive(Clone)]
pub struct Stack {
    tx: mpsc::Sender<Request>,
    token: CancellationToken,
}

impl Stack {
    /// Starts the control loop over all lights with the default [`Config`].
    ///
    /// Must be called within a tokio runtime.
    pub async fn new<C: Send + Sync + 'static>(
        base: Executor<C>,
        extra: Executor<C>,
        snapshot: impl Snapshot<C>,
    ) -> Self {
        Self::with_config(base, extra, snapshot, LightSet::All, &Config::default()).await
    }

    /// Starts the control loop over `lights`.
    ///
    /// Extra is paused before this returns, so nothing starts on it until the
    /// first push. Must be called within a tokio runtime.
    pub async fn with_config<C: Send + Sync + 'static>(
        base: Executor<C>,
        extra: Executor<C>,
        snapshot: impl Snapshot<C>,
        lights: LightSet,
        cfg: &Config,
    ) -> Self {
        extra.pause().await;

        let (tx, rx) = mpsc::channel(cfg.stack_queue_capacity_clamped());
        let token = CancellationToken::new();
        let layers = Layers {
            base,
            extra,
            snapshot: Arc::new(snapshot),
            lights,
            settle: cfg.settle(),
        };
        tokio::spawn(layers.run(rx, token.clone()));
        Self { tx, token }
    }

    /// Suspends base, captures the lights and hands them to extra.
    pub async fn push(&self) -> Result<(), StackError> {
        self.request(Request::Push).await
    }

    /// Suspends extra, restores the captured lights and hands them back to base.
    pub async fn pop(&self) -> Result<(), StackError> {
        self.request(Request::Pop).await
    }

    /// Stops the control loop. Waiting and later requests fail with [`StackError::Closed`].
    ///
    /// The executors are left in whatever phase the loop was in.
    pub fn close(&self) {
        self.token.cancel();
    }

    async fn request(&self, make: fn(oneshot::Sender<()>) -> Request) -> Result<(), StackError> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(make(tx)).await.map_err(|_| StackError::Closed)?;
        rx.await.map_err(|_| StackError::Closed)
    }
}

/// The state owned by the control loop.
struct Layers<C> {
    base: Executor<C>,
    extra: Executor<C>,
    snapshot: Arc<dyn Snapshot<C>>,
    lights: LightSet,
    settle: Option<Duration>,
}

impl<C: Send + Sync + 'static> Layers<C> {
    async fn run(self, mut rx: mpsc::Receiver<Request>, token: CancellationToken) {
        let mut phase = Phase::Base;
        let mut pushes: VecDeque<oneshot::Sender<()>> = VecDeque::new();
        let mut pops: VecDeque<oneshot::Sender<()>> = VecDeque::new();

        loop {
            let waiting = match phase {
                Phase::Base => pushes.pop_front(),
                Phase::Extra { .. } => pops.pop_front(),
            };
            let reply = match waiting {
                Some(reply) => reply,
                None => {
                    let req = tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        req = rx.recv() => match req {
                            Some(req) => req,
                            None => break,
                        },
                    };
                    match (req, &phase) {
                        (Request::Push(reply), Phase::Base) => reply,
                        (Request::Pop(reply), Phase::Extra { .. }) => reply,
                        (Request::Push(reply), Phase::Extra { .. }) => {
                            pushes.push_back(reply);
                            continue;
                        }
                        (Request::Pop(reply), Phase::Base) => {
                            pops.push_back(reply);
                            continue;
                        }
                    }
                }
            };

            phase = match phase {
                Phase::Base => Phase::Extra {
                    restore: self.push().await,
                },
                Phase::Extra { restore } => {
                    self.pop(restore).await;
                    Phase::Base
                }
            };
            let _ = reply.send(());
        }
        tracing::debug!("override control loop stopped");
    }

    async fn push(&self) -> Option<ActionRef<C>> {
        tracing::info!(lights = %self.lights, "override: pushing");
        self.base.pause().await;
        if let Some(settle) = self.settle {
            tokio::time::sleep(settle).await;
        }

        let snap = AssertUnwindSafe(self.snapshot.snapshot(self.base.context(), &self.lights))
            .catch_unwind()
            .await;
        let restore = match snap {
            Ok(Ok(restore)) => Some(restore),
            Ok(Err(e)) => {
                self.report(EventKind::SnapshotFailed, e.to_string());
                None
            }
            Err(panic) => {
                self.report(
                    EventKind::SnapshotFailed,
                    format!("panicked: {}", panic_message(panic.as_ref())),
                );
                None
            }
        };

        self.extra.resume().await;
        restore
    }

    async fn pop(&self, restore: Option<ActionRef<C>>) {
        tracing::info!(
            lights = %self.lights,
            restore = restore.is_some(),
            "override: popping"
        );
        self.extra.pause().await;

        if let Some(action) = restore {
            let exec = Execution::standalone(self.base.supervisor().clock());
            let res = AssertUnwindSafe(action.execute(self.base.context(), &self.lights, &exec))
                .catch_unwind()
                .await;
            exec.finish();
            match res {
                Ok(Ok(())) | Ok(Err(TaskError::Canceled)) => {}
                Ok(Err(e)) => self.report(EventKind::RestoreFailed, e.to_string()),
                Err(panic) => self.report(
                    EventKind::RestoreFailed,
                    format!("panicked: {}", panic_message(panic.as_ref())),
                ),
            }
        }

        self.base.resume().await;
    }

    fn report(&self, kind: EventKind, reason: String) {
        tracing::error!(
            kind = kind.as_label(),
            lights = %self.lights,
            %reason,
            "override step failed"
        );
        if let Some(subs) = self.base.subscribers() {
            subs.emit(
                Event::new(kind)
                    .with_lights(self.lights.to_string())
                    .with_reason(reason),
            );
        }
    }
}
