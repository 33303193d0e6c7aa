// src/sink.rs

//! Operator-facing run log.
//!
//! Every line the operator sees has the shape
//! `[YYYY-MM-DD HH:MM:SS] PREFIX: message`, with the timestamp rendered in
//! the configured timezone. This is the scheduler's user interface, not a
//! diagnostics channel; internal diagnostics go through `tracing` (see
//! [`crate::logging`]).
//!
//! The sink is shared between the scheduling loop and the two concurrent
//! stream-draining tasks of a running job. Each line is emitted with a
//! single `writeln!` while holding the stdout lock, so lines from different
//! tasks may interleave with each other but never within a line.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::config::TimeZoneContext;

/// Identity of the child stream an output line was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTag {
    Stdout,
    Stderr,
}

impl StreamTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamTag::Stdout => "STDOUT",
            StreamTag::Stderr => "STDERR",
        }
    }
}

#[derive(Clone)]
enum Target {
    Stdout,
    /// Captures formatted lines for tests instead of writing them out.
    Memory(Arc<Mutex<Vec<String>>>),
}

/// Timestamped line sink, cheap to clone into draining tasks.
#[derive(Clone)]
pub struct LogSink {
    tz: TimeZoneContext,
    target: Target,
}

impl LogSink {
    pub fn new(tz: TimeZoneContext) -> Self {
        Self {
            tz,
            target: Target::Stdout,
        }
    }

    /// Sink that records lines in memory, for asserting on log output in
    /// tests without capturing the process's stdout.
    pub fn memory(tz: TimeZoneContext) -> (Self, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                tz,
                target: Target::Memory(lines.clone()),
            },
            lines,
        )
    }

    pub fn info(&self, message: &str) {
        self.write("INFO", message);
    }

    pub fn warn(&self, message: &str) {
        self.write("WARN", message);
    }

    pub fn error(&self, message: &str) {
        self.write("ERROR", message);
    }

    /// One line of child output, tagged with its stream.
    pub fn stream(&self, tag: StreamTag, line: &str) {
        self.write(tag.as_str(), line);
    }

    fn write(&self, prefix: &str, message: &str) {
        let line = format!("[{}] {}: {}", self.tz.timestamp(), prefix, message);
        match &self.target {
            Target::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = writeln!(out, "{line}");
            }
            Target::Memory(lines) => {
                if let Ok(mut guard) = lines.lock() {
                    guard.push(line);
                }
            }
        }
    }
}
