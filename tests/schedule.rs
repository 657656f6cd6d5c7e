mod common;

use common::{hold, set, wait_until};
use lightvisor::{DailyAt, Executor, ScheduledTask};

fn running(views: Vec<lightvisor::ActionView>) -> Vec<String> {
    views.into_iter().map(|v| v.task_id).collect()
}

#[tokio::test]
async fn one_shot_low_priority_uses_free_lights() {
    let executor = Executor::new(());
    executor.start(hold(1), &set(&[1, 2])).await;

    let rule = ScheduledTask::new(
        7,
        "Reading light",
        hold(9),
        set(&[2, 3]),
        None,
        false,
        executor.clone(),
    );
    assert!(!rule.is_enabled().await);
    rule.enable().await;

    let ex = &executor;
    wait_until(|| async move { ex.tasks().await.len() == 2 }).await;
    assert_eq!(running(executor.views().await), ["1:1,2", "9:3"]);

    let r = &rule;
    wait_until(|| async move { !r.is_enabled().await }).await;
    executor.close().await;
}

#[tokio::test]
async fn one_shot_low_priority_never_disturbs() {
    let executor = Executor::new(());
    executor.start(hold(1), &set(&[1, 2])).await;

    let rule = ScheduledTask::new(7, "Dim", hold(9), set(&[2]), None, false, executor.clone());
    rule.enable().await;

    let r = &rule;
    wait_until(|| async move { !r.is_enabled().await }).await;
    assert_eq!(running(executor.views().await), ["1:1,2"]);
    executor.close().await;
}

#[tokio::test]
async fn high_priority_preempts() {
    let executor = Executor::new(());
    let evening = executor.start(hold(1), &set(&[1, 2])).await.unwrap();
    executor.start(hold(3), &set(&[3])).await;

    let rule = ScheduledTask::new(8, "Alarm", hold(9), set(&[2]), None, true, executor.clone());
    assert!(rule.high_priority());
    rule.enable().await;

    let ex = &executor;
    wait_until(|| async move { running(ex.views().await) == ["3:3", "9:2"] }).await;
    assert!(evening.is_done());
    executor.close().await;
}

#[tokio::test]
async fn daily_rule_runs_until_disabled() {
    let executor = Executor::new(());
    let at = DailyAt::new(6, 45).unwrap();
    let rule = ScheduledTask::new(
        9,
        "Wake up",
        hold(21),
        set(&[5, 7]),
        Some(at),
        false,
        executor.clone(),
    );
    assert_eq!(rule.times(), Some(at));
    assert_eq!(rule.lights(), &set(&[5, 7]));
    assert_eq!(rule.description(), "Wake up");

    rule.enable().await;
    rule.enable().await;
    assert!(rule.is_enabled().await);

    rule.disable().await;
    assert!(!rule.is_enabled().await);
    assert!(executor.tasks().await.is_empty());

    rule.enable().await;
    assert!(rule.is_enabled().await);
    rule.disable().await;
}
