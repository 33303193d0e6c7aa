// src/exec/runner.rs

//! Single job execution: spawn, deadline, outcome.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::exec::stream;
use crate::sink::{LogSink, StreamTag};

/// The fixed command the scheduler executes on every fire.
///
/// Immutable for the process lifetime; PATH existence is checked once at
/// startup, resolution itself happens again at each spawn.
#[derive(Debug, Clone)]
pub struct JobDefinition {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl JobDefinition {
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Terminal state of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Nonzero exit code.
    Failed(i32),
    /// Terminated by a signal other than our own timeout kill (unix only).
    Signaled(i32),
    /// Deadline elapsed; the child was killed.
    TimedOut,
    /// The process could not be created at all.
    SpawnFailed,
}

/// Run one execution of `job`, bounded by its timeout.
///
/// The child's stdout and stderr are drained concurrently into the sink,
/// and both drains are joined before the outcome line is logged, so no
/// trailing output is lost even when the child exits or is killed while
/// bytes are still in flight. No outcome is fatal to the caller.
pub async fn run(job: &JobDefinition, sink: &LogSink) -> Outcome {
    sink.info(&format!("Executing: {}", job.command_line()));

    let mut cmd = Command::new(&job.program);
    cmd.args(&job.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            sink.error(&format!("Command failed to start: {err}"));
            return Outcome::SpawnFailed;
        }
    };

    // Deadline is absolute from execution start, independent of how long
    // the child takes to produce output.
    let deadline = Instant::now() + job.timeout;

    let stdout_task = child
        .stdout
        .take()
        .map(|pipe| tokio::spawn(stream::drain(pipe, StreamTag::Stdout, sink.clone())));
    let stderr_task = child
        .stderr
        .take()
        .map(|pipe| tokio::spawn(stream::drain(pipe, StreamTag::Stderr, sink.clone())));

    let outcome = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => classify(status),
            Err(err) => {
                warn!(error = %err, "failed to collect child exit status");
                Outcome::Failed(-1)
            }
        },
        _ = time::sleep_until(deadline) => {
            if let Err(err) = child.kill().await {
                warn!(error = %err, "failed to kill timed-out child");
            }
            Outcome::TimedOut
        }
    };

    // Join both drains before reporting: everything the child wrote before
    // exit or kill must already be in the log when the outcome line appears.
    if let Some(task) = stdout_task {
        let _ = task.await;
    }
    if let Some(task) = stderr_task {
        let _ = task.await;
    }

    match outcome {
        Outcome::Success => sink.info("Command finished successfully"),
        Outcome::Failed(code) => {
            sink.error(&format!("Command finished with error: exit status {code}"));
        }
        Outcome::Signaled(sig) => {
            sink.error(&format!("Command finished with error: signal {sig}"));
        }
        Outcome::TimedOut => {
            sink.error(&format!(
                "Command timed out after {}",
                humantime::format_duration(job.timeout)
            ));
        }
        // Reported at the spawn site.
        Outcome::SpawnFailed => {}
    }

    debug!(?outcome, "execution closed");
    outcome
}

fn classify(status: std::process::ExitStatus) -> Outcome {
    if status.success() {
        return Outcome::Success;
    }
    if let Some(code) = status.code() {
        return Outcome::Failed(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return Outcome::Signaled(sig);
        }
    }

    Outcome::Failed(-1)
}
