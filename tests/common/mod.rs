#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lightvisor::{
    Action, ActionFn, ActionRef, Event, EventKind, Execution, LightAction, LightSet, Snapshot,
    Subscribe, TaskError,
};

pub fn set(ids: &[u32]) -> LightSet {
    LightSet::new(ids.iter().copied())
}

/// Polls `cond` until it holds; panics after five seconds.
pub async fn wait_until<F, Fut>(mut cond: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let polled = tokio::time::timeout(Duration::from_secs(5), async {
        while !cond().await {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(polled.is_ok(), "condition not reached in time");
}

/// Drives its lights until ended.
pub fn hold<C: Sync + 'static>(id: u64) -> Action<C> {
    ActionFn::action(id, "Hold", |_lights: LightSet, exec: Execution| async move {
        exec.ended().await;
        Ok::<_, TaskError>(())
    })
}

/// Like [`hold`], with a custom `used_lights`.
pub fn hold_using<C: Sync + 'static>(
    id: u64,
    used: impl Fn(&LightSet) -> LightSet + Send + Sync + 'static,
) -> Action<C> {
    Action::new(
        id,
        "Hold",
        ActionFn::new(|_lights: LightSet, exec: Execution| async move {
            exec.ended().await;
            Ok::<_, TaskError>(())
        })
        .with_used_lights(used),
    )
}

/// Uses whatever it is offered plus light 10.
pub fn plus_ten<C: Sync + 'static>(id: u64) -> Action<C> {
    hold_using(id, |l| {
        if l.is_none() {
            LightSet::none()
        } else {
            l.union(&set(&[10]))
        }
    })
}

/// Uses `wanted` in full or nothing at all.
pub fn all_or_nothing<C: Sync + 'static>(id: u64, wanted: LightSet) -> Action<C> {
    hold_using(id, move |l| {
        if l.intersect(&wanted) == wanted {
            wanted.clone()
        } else {
            LightSet::none()
        }
    })
}

/// Wants every light whenever it is offered any.
pub fn wants_all<C: Sync + 'static>(id: u64) -> Action<C> {
    hold_using(id, |l| {
        if l.is_none() {
            LightSet::none()
        } else {
            LightSet::All
        }
    })
}

/// Returns right away without touching its lights.
pub fn quick<C: Sync + 'static>(id: u64) -> Action<C> {
    ActionFn::action(id, "Quick", |_lights: LightSet, _exec: Execution| async move {
        Ok::<_, TaskError>(())
    })
}

/// Records a failure on its execution, then returns `Ok`.
pub fn soft_fail<C: Sync + 'static>(id: u64, reason: &'static str) -> Action<C> {
    ActionFn::action(id, "SoftFail", move |_lights: LightSet, exec: Execution| async move {
        exec.set_error(TaskError::fail(reason));
        Ok::<_, TaskError>(())
    })
}

/// Fails right away.
pub fn broken<C: Sync + 'static>(id: u64, reason: &'static str) -> Action<C> {
    ActionFn::action(id, "Broken", move |_lights: LightSet, _exec: Execution| async move {
        Err(TaskError::fail(reason))
    })
}

/// Shared context that records what actions did, in order.
#[derive(Default)]
pub struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    pub fn note(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

/// Notes when it takes its lights and, if `hold`, when it lets go of them.
pub struct Scene {
    pub name: &'static str,
    pub hold: bool,
}

#[async_trait]
impl LightAction<Journal> for Scene {
    async fn execute(
        &self,
        ctx: &Journal,
        lights: &LightSet,
        exec: &Execution,
    ) -> Result<(), TaskError> {
        ctx.note(format!("{} on {}", self.name, lights));
        if self.hold {
            exec.ended().await;
            ctx.note(format!("{} off", self.name));
        }
        Ok(())
    }
}

pub fn scene(id: u64, name: &'static str) -> Action<Journal> {
    Action::new(id, name, Scene { name, hold: true })
}

/// Notes every snapshot and hands back a one-shot `restore` scene.
pub struct Capture {
    pub fail: bool,
}

#[async_trait]
impl Snapshot<Journal> for Capture {
    async fn snapshot(
        &self,
        ctx: &Journal,
        lights: &LightSet,
    ) -> Result<ActionRef<Journal>, TaskError> {
        ctx.note(format!("snapshot of {lights}"));
        if self.fail {
            return Err(TaskError::fail("bridge offline"));
        }
        Ok(Arc::new(Scene {
            name: "restore",
            hold: false,
        }))
    }
}

/// Keeps every event it receives.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Subscribe for Recorder {
    async fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}
