use chrono::{Timelike, Utc};

use cronrun::config::TimeZoneContext;
use cronrun::schedule::{ScheduleError, ScheduleSpec, parse};

fn expect_cron(expr: &str, with_seconds: bool) -> cron::Schedule {
    match parse(expr, with_seconds) {
        Ok(ScheduleSpec::Cron(schedule)) => schedule,
        other => panic!("expected cron schedule for {expr:?}, got {other:?}"),
    }
}

fn expect_interval(expr: &str) -> std::time::Duration {
    match parse(expr, false) {
        Ok(ScheduleSpec::Interval(duration)) => duration,
        other => panic!("expected interval for {expr:?}, got {other:?}"),
    }
}

#[test]
fn five_field_expression_parses_and_fires_in_the_future() {
    let schedule = expect_cron("30 * * * *", false);

    let now = Utc::now();
    let next = TimeZoneContext::Local
        .next_fire(&schedule)
        .expect("recurring schedule must have an upcoming fire");

    assert!(next > now, "next fire {next} not after {now}");
    assert_eq!(next.minute(), 30);
    assert_eq!(next.second(), 0, "5-field mode pins the seconds field to 0");
}

#[test]
fn step_expression_satisfies_its_field_constraint() {
    let schedule = expect_cron("*/5 * * * *", false);
    let next = TimeZoneContext::Local.next_fire(&schedule).unwrap();
    assert_eq!(next.minute() % 5, 0);
}

#[test]
fn six_fields_rejected_when_seconds_disabled() {
    match parse("0 */5 * * * *", false) {
        Err(ScheduleError::FieldCount { expected: 5, got: 6 }) => {}
        other => panic!("expected field-count error, got {other:?}"),
    }
}

#[test]
fn six_fields_accepted_when_seconds_enabled() {
    expect_cron("*/10 * * * * *", true);
}

#[test]
fn five_fields_rejected_when_seconds_enabled() {
    match parse("*/5 * * * *", true) {
        Err(ScheduleError::FieldCount { expected: 6, got: 5 }) => {}
        other => panic!("expected field-count error, got {other:?}"),
    }
}

#[test]
fn descriptors_parse_in_both_seconds_modes() {
    for descriptor in [
        "@yearly",
        "@annually",
        "@monthly",
        "@weekly",
        "@daily",
        "@midnight",
        "@hourly",
    ] {
        expect_cron(descriptor, false);
        expect_cron(descriptor, true);
    }
}

#[test]
fn hourly_descriptor_fires_on_the_hour() {
    let schedule = expect_cron("@hourly", false);
    let next = TimeZoneContext::Local.next_fire(&schedule).unwrap();
    assert_eq!(next.minute(), 0);
    assert_eq!(next.second(), 0);
}

#[test]
fn unknown_descriptor_is_rejected() {
    match parse("@fortnightly", false) {
        Err(ScheduleError::UnknownDescriptor(name)) => assert_eq!(name, "@fortnightly"),
        other => panic!("expected unknown-descriptor error, got {other:?}"),
    }
}

#[test]
fn interval_literals_parse_to_fixed_durations() {
    assert_eq!(expect_interval("@every 30m"), std::time::Duration::from_secs(30 * 60));
    assert_eq!(expect_interval("@every 250ms"), std::time::Duration::from_millis(250));
    assert_eq!(expect_interval("@every 1h30m"), std::time::Duration::from_secs(90 * 60));
}

#[test]
fn unparsable_interval_is_rejected() {
    assert!(matches!(
        parse("@every banana", false),
        Err(ScheduleError::Interval(..))
    ));
}

#[test]
fn zero_interval_is_rejected() {
    assert!(matches!(
        parse("@every 0s", false),
        Err(ScheduleError::ZeroInterval)
    ));
}

#[test]
fn out_of_range_field_values_are_rejected() {
    assert!(matches!(
        parse("60 * * * *", false),
        Err(ScheduleError::Cron(_))
    ));
    assert!(matches!(
        parse("* 25 * * *", false),
        Err(ScheduleError::Cron(_))
    ));
}

#[test]
fn empty_expression_is_rejected() {
    assert!(matches!(parse("", false), Err(ScheduleError::Empty)));
    assert!(matches!(parse("   ", false), Err(ScheduleError::Empty)));
}
