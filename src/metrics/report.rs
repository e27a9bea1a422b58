//! Aggregation of per-process results into report rows

use std::time::Duration;

use serde::Serialize;

use crate::core::sweep::Combination;
use crate::metrics::scrape::RunResult;

/// Aggregated metrics of every process in one combination
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub rows_inserted: u64,
    pub reported_rate: u64,
    pub connection_time: f64,
    pub insertion_time: f64,
    pub max_insertion_time: f64,
    /// Rows inserted over the slowest process's insertion time
    pub rows_per_sec: f64,
}

impl Totals {
    pub fn from_results(results: &[RunResult]) -> Self {
        let mut totals = results.iter().fold(Totals::default(), |mut acc, r| {
            acc.rows_inserted += r.rows_inserted;
            acc.reported_rate += r.reported_rate;
            acc.connection_time += r.connection_time;
            acc.insertion_time += r.insertion_time;
            acc.max_insertion_time = acc.max_insertion_time.max(r.insertion_time);
            acc
        });
        totals.rows_per_sec = if totals.max_insertion_time > 0.0 {
            totals.rows_inserted as f64 / totals.max_insertion_time
        } else {
            0.0
        };
        totals
    }
}

/// One line of the final report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub combination: Combination,
    /// Image size passed to the generator, 0 when images are not swept
    pub image_size: u64,
    /// Wall-clock time from the first launch to the last exit
    pub elapsed: Duration,
    pub totals: Totals,
    /// Individual results, in launch order
    pub processes: Vec<RunResult>,
}

impl SummaryRow {
    pub fn new(combination: Combination, image_size: u64, elapsed: Duration, processes: Vec<RunResult>) -> Self {
        SummaryRow {
            combination,
            image_size,
            elapsed,
            totals: Totals::from_results(&processes),
            processes,
        }
    }
}

/// Summary rows of a whole sweep, in the order they ran
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
    pub rows: Vec<SummaryRow>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    pub fn push(&mut self, row: SummaryRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rows_inserted: u64, insertion_time: f64) -> RunResult {
        RunResult {
            rows_inserted,
            insertion_time,
            ..Default::default()
        }
    }

    fn combination(batch_size: u32) -> Combination {
        Combination {
            commit_size: 100,
            batch_size,
            image_multiplier: 1,
            threads: 1,
            processes: 1,
            async_mode: false,
        }
    }

    #[test]
    fn test_throughput_uses_slowest_process() {
        let totals = Totals::from_results(&[result(100, 2.0), result(50, 4.0)]);

        assert_eq!(totals.rows_inserted, 150);
        assert_eq!(totals.insertion_time, 6.0);
        assert_eq!(totals.max_insertion_time, 4.0);
        assert_eq!(totals.rows_per_sec, 37.5);
    }

    #[test]
    fn test_zero_time_gives_zero_throughput() {
        let totals = Totals::from_results(&[result(100, 0.0)]);
        assert_eq!(totals.rows_per_sec, 0.0);

        let empty = Totals::from_results(&[]);
        assert_eq!(empty, Totals::default());
    }

    #[test]
    fn test_sums_connection_time_and_rates() {
        let a = RunResult {
            connection_time: 1.5,
            reported_rate: 10,
            ..Default::default()
        };
        let b = RunResult {
            connection_time: 0.5,
            reported_rate: 30,
            ..Default::default()
        };
        let totals = Totals::from_results(&[a, b]);

        assert_eq!(totals.connection_time, 2.0);
        assert_eq!(totals.reported_rate, 40);
    }

    #[test]
    fn test_report_keeps_run_order() {
        let mut report = Report::new();
        assert!(report.is_empty());
        report.push(SummaryRow::new(combination(10), 0, Duration::from_secs(1), vec![result(100, 1.0)]));
        report.push(SummaryRow::new(combination(20), 0, Duration::from_secs(1), vec![result(300, 1.0)]));

        assert_eq!(report.len(), 2);
        assert_eq!(report.rows[1].combination.batch_size, 20);
        assert_eq!(report.rows[1].totals.rows_per_sec, 300.0);
    }
}
