//! # Example: Override
//!
//! An operator takes every light away from the automated layer, then hands
//! it back in the state it was found.
//!
//! Demonstrates:
//! - a `Snapshot` that captures colors and returns the restoring action;
//! - `Stack::push` / `Stack::pop` switching between two executors;
//! - a daily `ScheduledTask` living on the base layer.
//!
//! ## Run
//! ```bash
//! cargo run --example override --features logging
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lightvisor::{
    Action, ActionRef, Config, DailyAt, Execution, ExecutorBuilder, LightAction, LightSet,
    LogWriter, ScheduledTask, Snapshot, Stack, Subscribe, TaskError,
};

/// A pretend bridge: light id → color.
#[derive(Default)]
struct Bridge {
    colors: Mutex<BTreeMap<u32, &'static str>>,
}

impl Bridge {
    fn paint(&self, lights: &LightSet, color: &'static str) {
        let mut colors = self.colors.lock().unwrap_or_else(|e| e.into_inner());
        match lights.ids() {
            Some(ids) => ids.into_iter().for_each(|id| {
                colors.insert(id, color);
            }),
            None => colors.values_mut().for_each(|c| *c = color),
        }
    }

    fn read(&self) -> BTreeMap<u32, &'static str> {
        self.colors.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Paints its lights and keeps them until ended.
struct Paint(&'static str);

#[async_trait]
impl LightAction<Bridge> for Paint {
    async fn execute(
        &self,
        bridge: &Bridge,
        lights: &LightSet,
        exec: &Execution,
    ) -> Result<(), TaskError> {
        bridge.paint(lights, self.0);
        exec.ended().await;
        Ok(())
    }
}

/// Puts captured colors back.
struct Restore(BTreeMap<u32, &'static str>);

#[async_trait]
impl LightAction<Bridge> for Restore {
    async fn execute(
        &self,
        bridge: &Bridge,
        _lights: &LightSet,
        _exec: &Execution,
    ) -> Result<(), TaskError> {
        for (id, color) in &self.0 {
            bridge.paint(&LightSet::new([*id]), color);
        }
        Ok(())
    }
}

struct Capture;

#[async_trait]
impl Snapshot<Bridge> for Capture {
    async fn snapshot(
        &self,
        bridge: &Bridge,
        _lights: &LightSet,
    ) -> Result<ActionRef<Bridge>, TaskError> {
        Ok(Arc::new(Restore(bridge.read())))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lightvisor::init_logging(None).map_err(|e| anyhow::anyhow!(e))?;

    let bridge = Arc::new(Bridge::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let base = ExecutorBuilder::with_shared_context(Arc::clone(&bridge))
        .with_subscribers(subs)
        .build();
    let extra = ExecutorBuilder::with_shared_context(Arc::clone(&bridge)).build();

    let cfg = Config {
        settle_delay: Duration::from_millis(100),
        ..Config::default()
    };
    let stack = Stack::with_config(base.clone(), extra.clone(), Capture, LightSet::All, &cfg).await;

    let wake = ScheduledTask::new(
        1,
        "Weekday wake-up",
        Action::new(40, "Wake up", Paint("sunrise")),
        "1,2".parse()?,
        Some(DailyAt::new(6, 45)?),
        true,
        base.clone(),
    );
    wake.enable().await;

    base.start(Action::new(21, "Evening", Paint("amber")), &"1,2,3".parse()?)
        .await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("before override: {:?}", bridge.read());

    stack.push().await?;
    extra
        .start(Action::new(90, "Party", Paint("strobe")), &LightSet::All)
        .await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    println!("during override: {:?}", bridge.read());

    stack.pop().await?;
    println!("after override:  {:?}", bridge.read());

    wake.disable().await;
    stack.close();
    base.close().await;
    extra.close().await;
    Ok(())
}
