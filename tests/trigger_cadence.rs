use std::time::Duration;

use chrono::{Timelike, Utc};
use tokio::time::Instant;

use cronrun::config::TimeZoneContext;
use cronrun::schedule::{ScheduleSpec, parse};
use cronrun::trigger::TriggerEngine;

fn interval_engine(expr: &str) -> TriggerEngine {
    let spec = parse(expr, false).expect("interval expression must parse");
    assert!(matches!(spec, ScheduleSpec::Interval(_)));
    TriggerEngine::new(spec, TimeZoneContext::Local)
}

#[tokio::test(start_paused = true)]
async fn interval_fires_on_a_fixed_cadence() {
    let mut engine = interval_engine("@every 250ms");
    let start = Instant::now();

    for fire in 1..=3u32 {
        engine.wait_next().await.expect("interval never exhausts");
        assert_eq!(
            start.elapsed(),
            Duration::from_millis(250 * u64::from(fire)),
            "fire {fire} off cadence"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn interval_does_not_drift_over_many_fires() {
    let mut engine = interval_engine("@every 50ms");
    let start = Instant::now();

    for _ in 0..40 {
        engine.wait_next().await.unwrap();
    }

    // Cadence is anchored to startup: 40 fires land exactly on the grid,
    // with no per-fire error accumulating.
    assert_eq!(start.elapsed(), Duration::from_millis(50 * 40));
}

#[tokio::test(start_paused = true)]
async fn slow_consumer_delays_ticks_without_stacking_them() {
    let mut engine = interval_engine("@every 100ms");
    let start = Instant::now();

    engine.wait_next().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(100));

    // Simulate a job that overruns two whole periods.
    tokio::time::sleep(Duration::from_millis(250)).await;

    // The missed tick fires immediately after the overrun instead of
    // waiting a full period, so cadence is delayed, not dropped.
    engine.wait_next().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(350));

    // And the cadence re-anchors to that delayed fire: no burst of
    // immediate catch-up fires for the other missed period.
    engine.wait_next().await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(450));
}

#[test]
fn cron_next_fire_is_in_the_future_and_within_one_period() {
    let spec = parse("* * * * *", false).unwrap();
    let ScheduleSpec::Cron(schedule) = spec else {
        panic!("expected cron schedule");
    };

    let now = Utc::now();
    let next = TimeZoneContext::Local.next_fire(&schedule).unwrap();

    assert!(next > now);
    assert!(
        next - now <= chrono::Duration::seconds(61),
        "every-minute schedule must fire within the next minute, got {next}"
    );
    assert_eq!(next.second(), 0);
}
