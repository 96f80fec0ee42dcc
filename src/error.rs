//! Errors that abort a harness run.

use crate::assert::AssertionError;
use crate::logger::LogError;
use crate::store::StoreError;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Every failure a test unit or the runner can produce.
///
/// None of these are caught inside the harness; the first one ends the run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The program under test could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program under test exited abnormally.
    ///
    /// stderr is logged by the executor when this is raised and kept here
    /// for callers, but left out of the message.
    #[error("`{command}` failed ({status})")]
    Exit {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Command text could not be split into arguments.
    #[error("invalid command {command:?}: {reason}")]
    InvalidCommand {
        command: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Assertion(#[from] AssertionError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    LogSink(#[from] LogError),

    /// Progress output could not be written.
    #[error("failed to write progress output: {0}")]
    Output(#[source] std::io::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown test unit: {0}")]
    UnknownUnit(String),

    #[error("duplicate test unit: {0}")]
    DuplicateUnit(String),
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
