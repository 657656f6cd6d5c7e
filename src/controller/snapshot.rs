use async_trait::async_trait;

use crate::error::TaskError;
use crate::lights::LightSet;
use crate::tasks::ActionRef;

/// Captures the current appearance of lights so it can be put back later.
///
/// The capture is returned as the action that restores it; the
/// [`Stack`](crate::Stack) runs that action once, on pop.
#[async_trait]
pub trait Snapshot<C>: Send + Sync + 'static {
    async fn snapshot(&self, ctx: &C, lights: &LightSet) -> Result<ActionRef<C>, TaskError>;
}
