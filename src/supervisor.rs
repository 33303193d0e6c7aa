// src/supervisor.rs

//! Scheduling loop and graceful shutdown.
//!
//! One loop iteration = wait for the next fire, then run the job to
//! completion before waiting again. The fire callback is awaited inside the
//! loop body, so executions of the job never overlap: a run that outlives
//! its own interval delays the next fire rather than racing it.
//!
//! Shutdown (SIGINT/SIGTERM) and the per-run timeout are two independent
//! cancellation mechanisms on purpose: shutdown only stops the loop from
//! waiting for further fires and lets an in-flight run finish, while the
//! timeout (in [`crate::exec`]) is the only thing that kills a running
//! child. A signal is acknowledged on the log as soon as it arrives, even
//! mid-run; the exit itself waits for the run's outcome.

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::{self, JobDefinition};
use crate::sink::LogSink;
use crate::trigger::TriggerEngine;

pub struct Supervisor {
    engine: TriggerEngine,
    job: JobDefinition,
    sink: LogSink,
}

impl Supervisor {
    pub fn new(engine: TriggerEngine, job: JobDefinition, sink: LogSink) -> Self {
        Self { engine, job, sink }
    }

    /// Run until a termination signal arrives. Always exits cleanly: per-run
    /// failures are logged by the executor and never bubble up here.
    pub async fn run(mut self) -> Result<()> {
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        info!("scheduler loop started");

        loop {
            tokio::select! {
                // Biased so a pending shutdown always wins over a fire that
                // became due at the same instant: no fires after the signal.
                biased;

                _ = &mut shutdown => {
                    self.sink.info("Shutting down scheduler…");
                    break;
                }

                fired = self.engine.wait_next() => match fired {
                    Some(()) => {
                        let run = exec::run(&self.job, &self.sink);
                        tokio::pin!(run);
                        tokio::select! {
                            biased;

                            outcome = &mut run => {
                                debug!(?outcome, "fire handled");
                            }

                            // A signal mid-run is acknowledged immediately;
                            // the run itself is never preempted by shutdown,
                            // only by its own timeout, so we still wait for
                            // its outcome before exiting.
                            _ = &mut shutdown => {
                                self.sink.info("Shutting down scheduler…");
                                let outcome = run.await;
                                debug!(?outcome, "fire handled");
                                break;
                            }
                        }
                    }
                    None => {
                        warn!("schedule has no upcoming fire times; stopping");
                        break;
                    }
                },
            }
        }

        info!("scheduler loop exited");
        Ok(())
    }
}

/// Resolves when a termination request arrives: Ctrl-C everywhere, plus
/// SIGTERM on unix. If a listener cannot be installed the corresponding arm
/// stays pending rather than faking a shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
