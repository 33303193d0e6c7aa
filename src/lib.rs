// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod schedule;
pub mod sink;
pub mod supervisor;
pub mod trigger;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::Settings;
use crate::errors::{CronrunError, Result};
use crate::exec::JobDefinition;
use crate::sink::LogSink;
use crate::supervisor::Supervisor;
use crate::trigger::TriggerEngine;

/// High-level entry point used by `main.rs`.
///
/// Validates everything up front — schedule syntax, command presence, env
/// fallbacks — before the trigger engine starts, so there is no partial
/// startup. Fatal errors are reported on the operator sink here; the caller
/// only maps `Err` to the exit code.
pub async fn run(args: CliArgs) -> Result<()> {
    let (settings, warnings) = Settings::from_env();
    let sink = LogSink::new(settings.tz);
    for warning in &warnings {
        sink.warn(warning);
    }

    let spec = match schedule::parse(&args.schedule, settings.with_seconds) {
        Ok(spec) => spec,
        Err(err) => {
            sink.error(&format!("Invalid schedule format: {err}"));
            return Err(CronrunError::Schedule(err));
        }
    };

    // Fail fast at startup instead of on the first fire. Resolution itself
    // is repeated by the OS at each spawn.
    if which::which(&args.command).is_err() {
        sink.error(&format!("Command not found: {}", args.command));
        return Err(CronrunError::CommandNotFound(args.command));
    }

    sink.info(&format!(
        "Cron scheduled: {} (TZ={}, timeout={}, seconds={})",
        args.schedule,
        settings.tz.name(),
        humantime::format_duration(settings.timeout),
        settings.with_seconds
    ));

    let job = JobDefinition {
        program: args.command,
        args: args.args,
        timeout: settings.timeout,
    };
    sink.info(&format!("Command: {}", job.command_line()));

    debug!(schedule = %args.schedule, "startup validation complete");

    let engine = TriggerEngine::new(spec, settings.tz);
    Supervisor::new(engine, job, sink).run().await
}
