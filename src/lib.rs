//! ingest-bench: parameter sweeps over database ingestion tools
//!
//! This crate drives an external data generator or loader through every
//! combination of batch size, commit size, thread count and the other
//! configured dimensions, scrapes the throughput each run reports and
//! aggregates the results into a report.

pub mod core;
pub mod metrics;
pub mod runner;

pub use crate::core::{BenchError, Combination, CommandLine, Connection, Result, SchemaType, SweepConfig, SweepDefaults, ToolPaths, Workload};
pub use crate::metrics::{Report, RunResult, SummaryRow, Totals};
pub use crate::runner::{Launcher, ProcessLauncher, RunOptions, Runner};
