mod common;

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone, Utc};
use common::{hold, set, wait_until};
use lightvisor::{Clock, Executor, FakeClock, LightSet, Timer};

fn fixture() -> (FakeClock, Executor<()>, Timer<()>) {
    let clock = FakeClock::new(Utc.with_ymd_and_hms(2014, 11, 7, 16, 43, 0).unwrap());
    let executor = Executor::builder(())
        .with_clock(Arc::new(clock.clone()))
        .build();
    let timer = Timer::new(executor.clone());
    (clock, executor, timer)
}

#[tokio::test]
async fn fires_on_time() {
    let (clock, executor, timer) = fixture();
    let when = clock.now() + TimeDelta::milliseconds(50);

    assert!(timer.schedule(hold(21), &set(&[5, 7]), when).await.is_some());
    let views = timer.views().await;
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].task_id, format!("21:{}:5,7", when.timestamp()));
    assert_eq!(views[0].time_left, "0:01");
    assert!(executor.tasks().await.is_empty());

    let ex = &executor;
    wait_until(|| async move { !ex.tasks().await.is_empty() }).await;
    assert_eq!(executor.views().await[0].task_id, "21:5,7");

    let t = &timer;
    wait_until(|| async move { t.scheduled().await.is_empty() }).await;
    executor.close().await;
}

#[tokio::test]
async fn cancel_prevents_the_start() {
    let (clock, executor, timer) = fixture();
    let when = clock.now() + TimeDelta::hours(1);
    timer.schedule(hold(3), &set(&[1]), when).await;

    let views = timer.views().await;
    assert_eq!(views[0].time_left, "1:00:01");

    clock.advance(TimeDelta::minutes(30));
    assert_eq!(timer.views().await[0].time_left, "30:01");

    let id = views[0].task_id.clone();
    assert!(timer.cancel(&id).await);
    assert!(timer.scheduled().await.is_empty());
    assert!(executor.tasks().await.is_empty());
    assert!(!timer.cancel(&id).await);
}

#[tokio::test]
async fn past_times_never_start() {
    let (clock, executor, timer) = fixture();
    let when = clock.now() - TimeDelta::seconds(1);
    let exec = timer.schedule(hold(3), &set(&[1]), when).await.unwrap();

    exec.done().await;
    assert!(timer.scheduled().await.is_empty());
    assert!(executor.tasks().await.is_empty());
}

#[tokio::test]
async fn no_lights_no_schedule() {
    let (clock, _executor, timer) = fixture();
    assert!(
        timer
            .schedule(hold(3), &LightSet::none(), clock.now())
            .await
            .is_none()
    );
}

#[tokio::test]
async fn timed_tasks_never_conflict() {
    let (clock, executor, timer) = fixture();
    let when = clock.now() + TimeDelta::hours(2);
    timer.schedule(hold(1), &set(&[1]), when).await;
    timer.schedule(hold(2), &set(&[1]), when).await;
    timer.schedule(hold(1), &set(&[2]), when).await;
    assert_eq!(timer.scheduled().await.len(), 3);

    timer.close().await;
    assert!(timer.scheduled().await.is_empty());
    assert!(timer.schedule(hold(4), &set(&[4]), when).await.is_none());

    assert!(executor.start(hold(5), &set(&[5])).await.is_some());
    executor.close().await;
}
