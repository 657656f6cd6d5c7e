//! # Function-backed action (`ActionFn`)
//!
//! [`ActionFn`] wraps a closure `F: Fn(LightSet, Execution) -> Fut`, producing a
//! fresh future per execution. It ignores the context, which makes it handy for
//! demos, tests and actions that carry their own handles.
//!
//! ## Example
//! ```rust
//! use lightvisor::{Action, ActionFn, Execution, LightSet, TaskError};
//!
//! let pulse: Action<()> = ActionFn::action(7, "Pulse", |lights: LightSet, exec: Execution| {
//!     async move {
//!         while exec.sleep(std::time::Duration::from_millis(250)).await {
//!             // toggle `lights` ...
//!         }
//!         let _ = lights;
//!         Ok::<_, TaskError>(())
//!     }
//! });
//!
//! assert_eq!(pulse.id(), 7);
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Execution;
use crate::error::TaskError;
use crate::lights::LightSet;
use crate::tasks::action::{Action, LightAction};

type UsedLightsFn = Arc<dyn Fn(&LightSet) -> LightSet + Send + Sync>;

/// Function-backed light action.
pub struct ActionFn<F> {
    f: F,
    used: Option<UsedLightsFn>,
}

impl<F> ActionFn<F> {
    /// Creates a new function-backed action that drives exactly the lights it is offered.
    pub fn new(f: F) -> Self {
        Self { f, used: None }
    }

    /// Overrides [`LightAction::used_lights`]. `used` must be monotonic.
    pub fn with_used_lights(
        mut self,
        used: impl Fn(&LightSet) -> LightSet + Send + Sync + 'static,
    ) -> Self {
        self.used = Some(Arc::new(used));
        self
    }
}

impl<F, Fut> ActionFn<F>
where
    F: Fn(LightSet, Execution) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    /// Creates the action and wraps it as an [`Action`] right away.
    pub fn action<C: Sync + 'static>(id: u64, description: &str, f: F) -> Action<C> {
        Action::new(id, description, Self::new(f))
    }
}

#[async_trait]
impl<C, F, Fut> LightAction<C> for ActionFn<F>
where
    C: Sync + 'static,
    F: Fn(LightSet, Execution) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn used_lights(&self, candidates: &LightSet) -> LightSet {
        match &self.used {
            Some(used) => used(candidates),
            None => candidates.clone(),
        }
    }

    async fn execute(
        &self,
        _ctx: &C,
        lights: &LightSet,
        exec: &Execution,
    ) -> Result<(), TaskError> {
        (self.f)(lights.clone(), exec.clone()).await
    }
}
