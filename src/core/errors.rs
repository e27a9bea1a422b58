//! Error types for ingest-bench
//!
//! This module defines the errors that can occur while preparing
//! and running a benchmark sweep.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a benchmark sweep
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Lost contact with `{command}`: {source}")]
    Communicate {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    ExitStatus { command: String, status: std::process::ExitStatus },

    #[error("Config {path:?} has no IMAGE_GENERATOR {element} element")]
    MissingElement { path: PathBuf, element: &'static str },

    #[error("A benchmark worker thread panicked")]
    WorkerPanicked,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;
