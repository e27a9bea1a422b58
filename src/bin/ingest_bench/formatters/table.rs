use anyhow::Result;
use colored::*;
use ingest_bench::{Report, SummaryRow};
use prettytable::{Cell, Row, Table};

use crate::formatters::{process_cells, Formatter, Layout, PROCESS_HEADERS};

/// Formateur au format tableau
pub struct TableFormatter {
    /// Indique si les couleurs sont activées
    colored: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        TableFormatter { colored: true }
    }

    /// Désactive les couleurs
    pub fn without_colors() -> Self {
        TableFormatter { colored: false }
    }
}

fn build_table<I>(headers: &[&str], rows: I) -> Table
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut table = Table::new();
    table.set_titles(Row::new(headers.iter().map(|h| Cell::new(h)).collect()));
    for cells in rows {
        table.add_row(Row::new(
            cells.iter().map(|c| Cell::new(c).style_spec("r")).collect(),
        ));
    }
    table
}

impl Formatter for TableFormatter {
    fn format_report(&self, report: &Report, layout: Layout) -> Result<String> {
        let table = build_table(layout.headers(), report.rows.iter().map(|row| layout.cells(row)));
        Ok(table.to_string())
    }

    fn format_processes(&self, row: &SummaryRow) -> Result<String> {
        let table = build_table(&PROCESS_HEADERS, row.processes.iter().map(process_cells));
        Ok(table.to_string())
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_bench::{Combination, RunResult};
    use std::time::Duration;

    fn report(batch_sizes: &[u32]) -> Report {
        let mut report = Report::new();
        for &batch_size in batch_sizes {
            let combination = Combination {
                commit_size: 100,
                batch_size,
                image_multiplier: 1,
                threads: 1,
                processes: 1,
                async_mode: false,
            };
            let result = RunResult {
                rows_inserted: 1_000,
                insertion_time: 1.0,
                ..Default::default()
            };
            report.push(SummaryRow::new(combination, 100, Duration::from_secs(1), vec![result]));
        }
        report
    }

    #[test]
    fn test_report_table_has_headers_and_rows() {
        let text = TableFormatter::without_colors()
            .format_report(&report(&[50, 75]), Layout::DataGenerator)
            .unwrap();

        assert!(text.contains("Rows/sec Inserted"));
        assert!(text.contains("Image Size"));
        assert!(text.contains(" 75 "));
        assert!(text.contains("1,000"));
    }

    #[test]
    fn test_process_table() {
        let report = report(&[50]);
        let text = TableFormatter::without_colors().format_processes(&report.rows[0]).unwrap();

        assert!(text.contains("Connection Time"));
        assert!(text.contains("1,000"));
    }

    #[test]
    fn test_plain_messages() {
        let formatter = TableFormatter::without_colors();
        assert_eq!(formatter.format_error("boom"), "Error: boom");
        assert_eq!(formatter.format_info("done"), "Info: done");
    }
}
