// src/trigger.rs

//! Trigger engine: turns a validated [`ScheduleSpec`] into a sequence of
//! fire instants.
//!
//! The engine does not own a loop of its own; the supervisor polls
//! [`TriggerEngine::wait_next`] and runs the job when it resolves. Once the
//! supervisor stops polling (shutdown), no further fires can happen.

use std::time::Duration;

use chrono::Utc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::config::TimeZoneContext;
use crate::schedule::ScheduleSpec;

pub struct TriggerEngine {
    tz: TimeZoneContext,
    inner: Inner,
}

enum Inner {
    Cron(cron::Schedule),
    /// Ticker created at engine construction, so the cadence is anchored to
    /// startup and to the start of each fire, not to job completion.
    Interval(Interval),
}

impl TriggerEngine {
    pub fn new(spec: ScheduleSpec, tz: TimeZoneContext) -> Self {
        let inner = match spec {
            ScheduleSpec::Cron(schedule) => Inner::Cron(schedule),
            ScheduleSpec::Interval(period) => {
                let mut ticker = time::interval_at(Instant::now() + period, period);
                // A run that overlaps the next deadline delays that tick: it
                // fires immediately after the run and the cadence re-anchors
                // to the fire start, one period at a time. No catch-up burst.
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Inner::Interval(ticker)
            }
        };
        Self { tz, inner }
    }

    /// Sleep (non-busy) until the next fire instant.
    ///
    /// Returns `None` when the schedule has no upcoming fire time, which for
    /// a recurring schedule only happens for expressions pinned to a past
    /// date. Cron instants are recomputed from the current time in the
    /// configured zone on every call, so offset and DST changes take effect
    /// at the next recomputation.
    pub async fn wait_next(&mut self) -> Option<()> {
        match &mut self.inner {
            Inner::Interval(ticker) => {
                ticker.tick().await;
                Some(())
            }
            Inner::Cron(schedule) => {
                let next = self.tz.next_fire(schedule)?;
                let delay = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
                debug!(next = %next, ?delay, "waiting for next fire");
                time::sleep(delay).await;
                Some(())
            }
        }
    }
}
