// src/config.rs

//! Environment-based runtime settings.
//!
//! `cronrun` is configured entirely through argv and three environment
//! variables:
//!
//! - `CRON_WITH_SECONDS`: "true" enables 6-field cron expressions with a
//!   leading seconds field (default: disabled)
//! - `CRON_TIMEOUT`: per-run execution deadline as a duration string
//!   (default: "1h")
//! - `TZ`: IANA timezone name used for both schedule interpretation and log
//!   timestamps (default: the process-local zone)
//!
//! Bad values for `CRON_TIMEOUT` and `TZ` fall back to the defaults with a
//! warning; they never abort startup. Only the schedule expression and the
//! command are validated fatally, and that happens in `lib.rs::run`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// A resolved calendar/clock location.
///
/// Keeping the local zone as its own variant (rather than forcing a lookup
/// of the system zone name) means an unset `TZ` behaves exactly like the
/// platform's local time, including any zone changes applied while the
/// process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneContext {
    Local,
    Named(Tz),
}

impl TimeZoneContext {
    /// Resolve an IANA zone name. Returns `None` for unknown names; the
    /// caller decides whether that is a warning or an error.
    pub fn resolve(name: &str) -> Option<Self> {
        name.parse::<Tz>().ok().map(TimeZoneContext::Named)
    }

    pub fn name(&self) -> &str {
        match self {
            TimeZoneContext::Local => "Local",
            TimeZoneContext::Named(tz) => tz.name(),
        }
    }

    /// Current wall-clock time rendered for the operator log.
    pub fn timestamp(&self) -> String {
        match self {
            TimeZoneContext::Local => chrono::Local::now().format(TIMESTAMP_FMT).to_string(),
            TimeZoneContext::Named(tz) => {
                Utc::now().with_timezone(tz).format(TIMESTAMP_FMT).to_string()
            }
        }
    }

    /// Next fire instant of `schedule` strictly after now, interpreted in
    /// this zone. Zone rules (offset shifts, DST) are applied at every call,
    /// nothing is cached from earlier computations.
    pub fn next_fire(&self, schedule: &cron::Schedule) -> Option<DateTime<Utc>> {
        match self {
            TimeZoneContext::Local => schedule
                .upcoming(chrono::Local)
                .next()
                .map(|dt| dt.with_timezone(&Utc)),
            TimeZoneContext::Named(tz) => schedule
                .upcoming(*tz)
                .next()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// Resolved process-wide settings.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub with_seconds: bool,
    pub timeout: Duration,
    pub tz: TimeZoneContext,
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// Returns the settings plus any fallback warnings. The warnings are
    /// returned rather than logged because the operator sink needs the
    /// resolved timezone before it can be constructed.
    pub fn from_env() -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let with_seconds = std::env::var("CRON_WITH_SECONDS")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let timeout_str = env_or("CRON_TIMEOUT", "1h");
        let timeout = match parse_timeout(&timeout_str) {
            Some(d) => d,
            None => {
                warnings.push(format!(
                    "Invalid CRON_TIMEOUT={timeout_str:?}, falling back to 1h"
                ));
                DEFAULT_TIMEOUT
            }
        };

        let tz_name = env_or("TZ", "");
        let tz = if tz_name.is_empty() {
            TimeZoneContext::Local
        } else {
            match TimeZoneContext::resolve(&tz_name) {
                Some(tz) => tz,
                None => {
                    warnings.push(format!("Invalid TZ={tz_name:?}, using local time"));
                    TimeZoneContext::Local
                }
            }
        };

        (
            Settings {
                with_seconds,
                timeout,
                tz,
            },
            warnings,
        )
    }
}

/// Parse a timeout duration string like "1h", "90s" or "1500ms".
///
/// Zero timeouts are rejected: a deadline of zero would kill every run
/// before it produced anything, which is never what the operator meant.
pub fn parse_timeout(s: &str) -> Option<Duration> {
    match humantime::parse_duration(s.trim()) {
        Ok(d) if !d.is_zero() => Some(d),
        _ => None,
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}
