//! # Example: Admission
//!
//! Starts a few actions on a shared bank of lights and shows which lights
//! each one is granted.
//!
//! Demonstrates:
//! - `maybe_start` taking only free lights;
//! - an "all or nothing" action being declined;
//! - `preempt` ending what overlaps;
//! - a one-off `Timer` and the built-in `LogWriter`.
//!
//! ## Run
//! ```bash
//! cargo run --example admission --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use lightvisor::{
    Action, ActionFn, Execution, Executor, LightSet, LogWriter, Subscribe, TaskError, Timer,
};

/// Pretends to fade `lights` one step every 200ms until ended.
fn fade(id: u64, description: &str) -> Action<()> {
    ActionFn::action(id, description, |lights: LightSet, exec: Execution| async move {
        let mut step = 0;
        while exec.sleep(Duration::from_millis(200)).await {
            step += 1;
            tracing::trace!(%lights, step, "fade step");
        }
        Ok::<_, TaskError>(())
    })
}

/// Only runs when it gets every light it asked for.
fn scene(id: u64, description: &str, wanted: LightSet) -> Action<()> {
    Action::new(
        id,
        description,
        ActionFn::new(|_lights: LightSet, exec: Execution| async move {
            exec.ended().await;
            Ok::<_, TaskError>(())
        })
        .with_used_lights(move |offered| {
            if offered.intersect(&wanted) == wanted {
                wanted.clone()
            } else {
                LightSet::none()
            }
        }),
    )
}

async fn show(executor: &Executor<()>) {
    for view in executor.views().await {
        println!("  running {:>8}  {}", view.task_id, view.description);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lightvisor::init_logging(None).map_err(|e| anyhow::anyhow!(e))?;

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let executor = Executor::builder(()).with_subscribers(subs).build();

    println!("1) sunset on 1,2");
    executor.maybe_start(fade(21, "Sunset"), &"1,2".parse()?).await;
    show(&executor).await;

    println!("2) candle asks for 2,3 and gets what is free");
    executor.maybe_start(fade(25, "Candle"), &"2,3".parse()?).await;
    show(&executor).await;

    println!("3) a scene that needs 3,4 together is declined");
    let wanted: LightSet = "3,4".parse()?;
    let started = executor.maybe_start(scene(31, "Movie", wanted.clone()), &wanted).await;
    println!("  started: {}", started.is_some());

    println!("4) the scene preempts whatever holds 3 or 4");
    executor.preempt(scene(31, "Movie", wanted.clone()), &wanted).await;
    show(&executor).await;

    println!("5) wake-up scheduled in one second");
    let timer = Timer::new(executor.clone());
    timer
        .schedule(fade(40, "Wake up"), &"5".parse()?, Utc::now() + TimeDelta::seconds(1))
        .await;
    for view in timer.views().await {
        println!("  pending {}  in {}", view.task_id, view.time_left);
    }
    tokio::time::sleep(Duration::from_millis(1500)).await;
    show(&executor).await;

    println!("6) closing");
    timer.close().await;
    executor.close().await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    Ok(())
}
