//! # Light actions.
//!
//! A [`LightAction`] is the capability the engine arbitrates: something that
//! drives a set of lights for a while (a fade, a scene, a blinking alarm).
//! An [`Action`] wraps one with the identity the engine tracks it by.
//!
//! ## Used lights
//! [`LightAction::used_lights`] answers "given these candidate lights, which
//! would you actually drive?". Admission relies on it being monotonic:
//! offered only part of the lights it asked for, an action must not ask for
//! lights outside that part.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::Execution;
use crate::error::TaskError;
use crate::lights::LightSet;

/// # Something that drives lights, against a context `C`.
///
/// `C` is whatever the action needs to reach the lights (a bridge client,
/// a test recorder); the engine never looks inside it.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use lightvisor::{Execution, LightAction, LightSet, TaskError};
///
/// struct Dim;
///
/// #[async_trait]
/// impl LightAction<()> for Dim {
///     async fn execute(
///         &self,
///         _ctx: &(),
///         lights: &LightSet,
///         exec: &Execution,
///     ) -> Result<(), TaskError> {
///         for _step in 0..10 {
///             if !exec.sleep(std::time::Duration::from_millis(100)).await {
///                 return Err(TaskError::Canceled);
///             }
///             // lower brightness of `lights` one step ...
///         }
///         let _ = lights;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait LightAction<C>: Send + Sync + 'static {
    /// Lights this action would drive if offered `candidates`.
    ///
    /// Must be monotonic. The default drives exactly the candidates.
    fn used_lights(&self, candidates: &LightSet) -> LightSet {
        candidates.clone()
    }

    /// Drives `lights` until done or until `exec` is ended.
    async fn execute(&self, ctx: &C, lights: &LightSet, exec: &Execution) -> Result<(), TaskError>;
}

/// Shared handle to a light action.
pub type ActionRef<C> = Arc<dyn LightAction<C>>;

/// A light action with its numeric id and description.
///
/// Cheap to clone; clones share the action.
pub struct Action<C> {
    id: u64,
    description: Arc<str>,
    inner: ActionRef<C>,
}

impl<C: 'static> Action<C> {
    /// Wraps a concrete action.
    pub fn new(id: u64, description: impl Into<Arc<str>>, action: impl LightAction<C>) -> Self {
        Self::from_ref(id, description, Arc::new(action))
    }

    /// Wraps an already shared action.
    pub fn from_ref(id: u64, description: impl Into<Arc<str>>, action: ActionRef<C>) -> Self {
        Self {
            id,
            description: description.into(),
            inner: action,
        }
    }

    /// See [`LightAction::used_lights`].
    pub fn used_lights(&self, candidates: &LightSet) -> LightSet {
        self.inner.used_lights(candidates)
    }

    /// See [`LightAction::execute`].
    pub async fn execute(
        &self,
        ctx: &C,
        lights: &LightSet,
        exec: &Execution,
    ) -> Result<(), TaskError> {
        self.inner.execute(ctx, lights, exec).await
    }
}

impl<C> Action<C> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn action(&self) -> &ActionRef<C> {
        &self.inner
    }
}

impl<C> Clone for Action<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            description: Arc::clone(&self.description),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
