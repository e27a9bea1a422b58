use anyhow::Result;
use ingest_bench::{Report, SummaryRow};
use serde_json::json;

use crate::formatters::{Formatter, Layout};

/// Formateur au format JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter
    }
}

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &Report, _layout: Layout) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_processes(&self, row: &SummaryRow) -> Result<String> {
        Ok(serde_json::to_string_pretty(&row.processes)?)
    }

    fn format_error(&self, error: &str) -> String {
        json!({ "error": error }).to_string()
    }

    fn format_info(&self, info: &str) -> String {
        json!({ "info": info }).to_string()
    }
}
