// src/exec/mod.rs

//! Process execution layer.
//!
//! This module owns one execution at a time: it spawns the configured
//! command with `tokio::process::Command`, drains stdout and stderr
//! concurrently into the operator sink, enforces the per-run deadline, and
//! classifies the result as an [`Outcome`].
//!
//! - [`runner`] spawns the child and races exit against the deadline.
//! - [`stream`] reads the output pipes line-by-line with a bounded buffer.

pub mod runner;
pub mod stream;

pub use runner::{JobDefinition, Outcome, run};
