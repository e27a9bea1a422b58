pub mod command;
pub mod errors;
pub mod sweep;
pub mod tools;

pub use command::{CommandLine, Connection};
pub use errors::{BenchError, Result};
pub use sweep::{Combination, SweepConfig, SweepDefaults};
pub use tools::{SchemaType, ToolPaths, Workload};
