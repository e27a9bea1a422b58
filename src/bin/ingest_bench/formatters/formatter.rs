use anyhow::Result;
use ingest_bench::{Report, SummaryRow};

use crate::formatters::Layout;

/// Trait définissant un formateur de résultats
pub trait Formatter {
    /// Formate le résumé d'un balayage complet
    fn format_report(&self, report: &Report, layout: Layout) -> Result<String>;

    /// Formate les résultats de chaque processus d'une combinaison
    fn format_processes(&self, row: &SummaryRow) -> Result<String>;

    /// Formate un message d'erreur
    fn format_error(&self, error: &str) -> String;

    /// Formate un message d'information
    fn format_info(&self, info: &str) -> String;
}
