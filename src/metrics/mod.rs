pub mod report;
pub mod scrape;

pub use report::{Report, SummaryRow, Totals};
pub use scrape::{extract, extract_count, extract_seconds, scrape, Metric, RunResult};
