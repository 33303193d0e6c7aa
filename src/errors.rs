// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::schedule::ScheduleError;

#[derive(Error, Debug)]
pub enum CronrunError {
    #[error("Invalid schedule format: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CronrunError>;
