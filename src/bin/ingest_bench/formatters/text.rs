use anyhow::Result;
use colored::*;
use ingest_bench::{Report, SummaryRow};

use crate::formatters::{process_cells, Formatter, Layout, PROCESS_HEADERS};

/// Formateur texte, un groupe de lignes `en-tête: valeur` par ligne
pub struct TextFormatter {
    /// Indique si les couleurs sont activées
    colored: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        TextFormatter { colored: true }
    }

    /// Désactive les couleurs
    pub fn without_colors() -> Self {
        TextFormatter { colored: false }
    }
}

fn lines(headers: &[&str], cells: &[String]) -> String {
    headers
        .iter()
        .zip(cells)
        .map(|(header, cell)| format!("{}: {}", header, cell))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Formatter for TextFormatter {
    fn format_report(&self, report: &Report, layout: Layout) -> Result<String> {
        Ok(report
            .rows
            .iter()
            .map(|row| lines(layout.headers(), &layout.cells(row)))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn format_processes(&self, row: &SummaryRow) -> Result<String> {
        Ok(row
            .processes
            .iter()
            .map(|result| lines(&PROCESS_HEADERS, &process_cells(result)))
            .collect::<Vec<_>>()
            .join("\n"))
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

    #[test]
    fn test_one_line_per_row() {
        let combination = Combination {
            commit_size: 1,
            batch_size: 1,
            image_multiplier: 1,
            threads: 2,
            processes: 1,
            async_mode: false,
        };
        let mut report = Report::new();
        report.push(SummaryRow::new(combination, 0, Duration::from_secs(1), vec![RunResult::default()]));
        report.push(SummaryRow::new(combination, 0, Duration::from_secs(2), vec![RunResult::default()]));

        let text = TextFormatter::without_colors()
            .format_report(&report, Layout::SimpleLoader)
            .unwrap();

        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("JVMs Started: 1, Total Rows Inserted: 0, Batch Size: 1"));
        assert!(text.lines().nth(1).unwrap().contains("Real Time Taken: 2.00"));
    }
}
