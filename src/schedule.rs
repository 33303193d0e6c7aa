// src/schedule.rs

//! Schedule expression parsing and validation.
//!
//! Three forms are accepted:
//!
//! 1. Field expressions: 5 fields (minute hour day-of-month month
//!    day-of-week), or 6 with a leading seconds field when seconds mode is
//!    enabled.
//! 2. Descriptors: `@hourly`, `@daily` / `@midnight`, `@weekly`, `@monthly`,
//!    `@yearly` / `@annually`, mapped to canonical field patterns.
//! 3. Intervals: `@every <duration>`, e.g. `@every 30m`, firing on a fixed
//!    cadence starting one duration after startup.
//!
//! Parsing is pure: no clock reads, no side effects. A [`ScheduleSpec`] that
//! failed validation can never reach the trigger engine because this is the
//! only way to construct one.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Validated, immutable schedule.
#[derive(Debug, Clone)]
pub enum ScheduleSpec {
    /// Field-based or descriptor schedule, held in the `cron` crate's
    /// seconds-first normal form.
    Cron(cron::Schedule),
    /// `@every <duration>`: fire every fixed duration, cadence anchored to
    /// the start of each fire.
    Interval(Duration),
}

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("empty schedule expression")]
    Empty,

    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("unknown descriptor '{0}'")]
    UnknownDescriptor(String),

    #[error("bad interval duration '{0}': {1}")]
    Interval(String, humantime::DurationError),

    #[error("interval duration must be greater than zero")]
    ZeroInterval,

    #[error(transparent)]
    Cron(#[from] cron::error::Error),
}

/// Parse and validate a schedule expression.
///
/// `with_seconds` switches the accepted field count from 5 to 6; it has no
/// effect on descriptors or intervals.
pub fn parse(expr: &str, with_seconds: bool) -> Result<ScheduleSpec, ScheduleError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(ScheduleError::Empty);
    }

    if let Some(rest) = expr.strip_prefix("@every ") {
        return parse_interval(rest.trim());
    }

    if expr.starts_with('@') {
        let pattern = descriptor_pattern(expr)?;
        return Ok(ScheduleSpec::Cron(cron::Schedule::from_str(pattern)?));
    }

    let expected = if with_seconds { 6 } else { 5 };
    let got = expr.split_whitespace().count();
    if got != expected {
        return Err(ScheduleError::FieldCount { expected, got });
    }

    // The cron crate's grammar always starts with a seconds field; in
    // 5-field mode we pin it to second zero of the scheduled minute.
    let normalized = if with_seconds {
        expr.to_string()
    } else {
        format!("0 {expr}")
    };

    Ok(ScheduleSpec::Cron(cron::Schedule::from_str(&normalized)?))
}

fn parse_interval(literal: &str) -> Result<ScheduleSpec, ScheduleError> {
    let duration = humantime::parse_duration(literal)
        .map_err(|e| ScheduleError::Interval(literal.to_string(), e))?;
    if duration.is_zero() {
        return Err(ScheduleError::ZeroInterval);
    }
    Ok(ScheduleSpec::Interval(duration))
}

/// Canonical seconds-first field pattern for a named descriptor.
fn descriptor_pattern(descriptor: &str) -> Result<&'static str, ScheduleError> {
    match descriptor.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => Ok("0 0 0 1 1 *"),
        "@monthly" => Ok("0 0 0 1 * *"),
        "@weekly" => Ok("0 0 0 * * Sun"),
        "@daily" | "@midnight" => Ok("0 0 0 * * *"),
        "@hourly" => Ok("0 0 * * * *"),
        other => Err(ScheduleError::UnknownDescriptor(other.to_string())),
    }
}
