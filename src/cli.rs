// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `cronrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cronrun",
    version,
    about = "Run a command on a cron schedule with a per-run timeout.",
    long_about = None
)]
pub struct CliArgs {
    /// Schedule expression: cron fields ("*/5 * * * *"), a descriptor
    /// ("@hourly"), or an interval ("@every 30m").
    ///
    /// Set CRON_WITH_SECONDS=true to use 6-field expressions with a leading
    /// seconds field.
    #[arg(value_name = "SCHEDULE")]
    pub schedule: String,

    /// Command to execute on every fire. Must be resolvable on PATH.
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Arguments passed to the command unchanged.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,

    /// Logging level for internal diagnostics (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRONRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::try_parse()`.
///
/// A missing schedule or command is a usage error with exit code 1, so we
/// can't rely on clap's default exit code (2).
pub fn parse() -> CliArgs {
    CliArgs::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(1);
    })
}
