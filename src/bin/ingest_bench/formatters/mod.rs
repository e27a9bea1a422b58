pub mod formatter;
pub mod json;
pub mod table;
pub mod text;

pub use formatter::Formatter;

use clap::ValueEnum;
use ingest_bench::{RunResult, SummaryRow};
use num_format::{Locale, ToFormattedString};

/// Formats de sortie disponibles
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tableau aligné
    Table,

    /// Une ligne par résultat
    Text,

    /// Document JSON
    Json,
}

impl OutputFormat {
    pub fn formatter(&self, colored: bool) -> Box<dyn Formatter> {
        match (self, colored) {
            (OutputFormat::Table, true) => Box::new(table::TableFormatter::new()),
            (OutputFormat::Table, false) => Box::new(table::TableFormatter::without_colors()),
            (OutputFormat::Text, true) => Box::new(text::TextFormatter::new()),
            (OutputFormat::Text, false) => Box::new(text::TextFormatter::without_colors()),
            (OutputFormat::Json, _) => Box::new(json::JsonFormatter::new()),
        }
    }
}

/// Colonnes affichées dans le rapport
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Balayages du générateur, avec les colonnes taille d'image et async
    DataGenerator,
    /// Exécutions du chargeur simple
    SimpleLoader,
}

impl Layout {
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Layout::DataGenerator => &[
                "JVMs Started",
                "Thread Count",
                "Commit Size",
                "Batch Size",
                "Image Size",
                "Async",
                "Total Rows Inserted",
                "Real Time Taken",
                "Total Insert Time",
                "Rows/sec Inserted",
            ],
            Layout::SimpleLoader => &[
                "JVMs Started",
                "Total Rows Inserted",
                "Batch Size",
                "Commit Size",
                "Threads",
                "Real Time Taken",
                "Total Insert Time",
                "Rows/sec Inserted",
            ],
        }
    }

    pub fn cells(&self, row: &SummaryRow) -> Vec<String> {
        let c = &row.combination;
        let t = &row.totals;
        match self {
            Layout::DataGenerator => vec![
                c.processes.to_string(),
                c.threads.to_string(),
                c.commit_size.to_string(),
                c.batch_size.to_string(),
                row.image_size.to_string(),
                c.async_mode.to_string(),
                grouped(t.rows_inserted),
                decimal(row.elapsed.as_secs_f64()),
                decimal(t.insertion_time),
                rate(t.rows_per_sec),
            ],
            Layout::SimpleLoader => vec![
                c.processes.to_string(),
                grouped(t.rows_inserted),
                c.batch_size.to_string(),
                c.commit_size.to_string(),
                c.threads.to_string(),
                decimal(row.elapsed.as_secs_f64()),
                decimal(t.insertion_time),
                rate(t.rows_per_sec),
            ],
        }
    }
}

pub const PROCESS_HEADERS: [&str; 4] = ["Connection Time", "Rows Processed", "Insert Time", "Rows/sec Inserted"];

pub fn process_cells(result: &RunResult) -> Vec<String> {
    vec![
        decimal(result.connection_time),
        grouped(result.rows_inserted),
        decimal(result.insertion_time),
        grouped(result.reported_rate),
    ]
}

fn grouped(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Deux décimales avec séparateur de milliers, `12,345.68`
fn decimal(value: f64) -> String {
    let cents = (value * 100.0).round() as u64;
    format!("{}.{:02}", grouped(cents / 100), cents % 100)
}

/// Lignes par seconde arrondies, avec séparateur de milliers
fn rate(value: f64) -> String {
    grouped(value.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_bench::Combination;
    use std::time::Duration;

    fn row() -> SummaryRow {
        let combination = Combination {
            commit_size: 100,
            batch_size: 50,
            image_multiplier: 2,
            threads: 4,
            processes: 2,
            async_mode: true,
        };
        let processes = vec![
            RunResult {
                connection_time: 1.0,
                rows_inserted: 100_000,
                insertion_time: 2.0,
                reported_rate: 50_000,
            },
            RunResult {
                connection_time: 1.0,
                rows_inserted: 50_000,
                insertion_time: 4.0,
                reported_rate: 12_500,
            },
        ];
        SummaryRow::new(combination, 200, Duration::from_millis(4_250), processes)
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(decimal(12345.678), "12,345.68");
        assert_eq!(decimal(0.0), "0.00");
        assert_eq!(rate(37.5), "38");
        assert_eq!(grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn test_cells_match_headers() {
        for layout in [Layout::DataGenerator, Layout::SimpleLoader] {
            assert_eq!(layout.cells(&row()).len(), layout.headers().len());
        }
    }

    #[test]
    fn test_data_generator_cells() {
        assert_eq!(
            Layout::DataGenerator.cells(&row()),
            vec!["2", "4", "100", "50", "200", "true", "150,000", "4.25", "6.00", "37,500"]
        );
    }

    #[test]
    fn test_process_cells() {
        assert_eq!(process_cells(&row().processes[0]), vec!["1.00", "100,000", "2.00", "50,000"]);
    }
}
