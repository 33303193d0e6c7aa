use std::time::Duration;

use cronrun::config::{DEFAULT_TIMEOUT, TimeZoneContext, parse_timeout};

#[test]
fn known_iana_zone_resolves() {
    let tz = TimeZoneContext::resolve("Europe/Oslo").expect("valid zone");
    assert_eq!(tz.name(), "Europe/Oslo");
}

#[test]
fn unknown_zone_does_not_resolve() {
    assert!(TimeZoneContext::resolve("Not/AZone").is_none());
    assert!(TimeZoneContext::resolve("").is_none());
}

#[test]
fn timeout_strings_parse_like_durations() {
    assert_eq!(parse_timeout("1h"), Some(Duration::from_secs(3600)));
    assert_eq!(parse_timeout("90s"), Some(Duration::from_secs(90)));
    assert_eq!(parse_timeout("1500ms"), Some(Duration::from_millis(1500)));
    assert_eq!(parse_timeout(" 2m "), Some(Duration::from_secs(120)));
}

#[test]
fn bad_timeout_strings_are_rejected_for_fallback() {
    assert_eq!(parse_timeout("banana"), None);
    assert_eq!(parse_timeout(""), None);
    assert_eq!(parse_timeout("0s"), None);
}

#[test]
fn default_timeout_is_one_hour() {
    assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(3600));
}
