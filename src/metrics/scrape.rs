//! Output scraping
//!
//! The external tools report their numbers in free-text banners such as
//! `Rows Inserted per sec      12,345`. Everything that knows about the
//! banner format lives in this module: callers ask for a [`Metric`] and
//! get back an optional number.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde::Serialize;

/// A number reported in a tool's output banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Insert rate the tool measured itself
    RowsInsertedPerSec,
    /// Rows the tool generated and inserted
    RowsGenerated,
    /// Time spent connecting, in seconds
    ConnectionTime,
    /// Time spent generating and inserting, in seconds
    GenerationTime,
}

impl Metric {
    /// Banner text preceding the value
    pub fn label(&self) -> &'static str {
        match self {
            Metric::RowsInsertedPerSec => "Rows Inserted per sec",
            Metric::RowsGenerated => "Actual Rows Generated",
            Metric::ConnectionTime => "Connection Time",
            Metric::GenerationTime => "Data Generation Time",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Metric::RowsInsertedPerSec => &*ROWS_INSERTED_PER_SEC,
            Metric::RowsGenerated => &*ROWS_GENERATED,
            Metric::ConnectionTime => &*CONNECTION_TIME,
            Metric::GenerationTime => &*GENERATION_TIME,
        }
    }

    fn is_duration(&self) -> bool {
        matches!(self, Metric::ConnectionTime | Metric::GenerationTime)
    }
}

static ROWS_INSERTED_PER_SEC: LazyLock<Regex> = LazyLock::new(|| count_pattern(Metric::RowsInsertedPerSec));
static ROWS_GENERATED: LazyLock<Regex> = LazyLock::new(|| count_pattern(Metric::RowsGenerated));
static CONNECTION_TIME: LazyLock<Regex> = LazyLock::new(|| duration_pattern(Metric::ConnectionTime));
static GENERATION_TIME: LazyLock<Regex> = LazyLock::new(|| duration_pattern(Metric::GenerationTime));

fn count_pattern(metric: Metric) -> Regex {
    Regex::new(&format!(r"{}\s*([0-9,]*)", regex::escape(metric.label()))).unwrap()
}

fn duration_pattern(metric: Metric) -> Regex {
    Regex::new(&format!(r"{}\s*([0-9.:]*)", regex::escape(metric.label()))).unwrap()
}

/// Metrics scraped from one process's output
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RunResult {
    /// Seconds spent connecting
    pub connection_time: f64,
    /// Rows inserted
    pub rows_inserted: u64,
    /// Seconds spent inserting
    pub insertion_time: f64,
    /// Insert rate reported by the tool
    pub reported_rate: u64,
}

/// Find the first value for `metric` in `text`
///
/// Counts may use comma grouping; durations may be clock style
/// (`HH:MM:SS.fff`) or plain seconds. Returns `None` when the label is
/// missing or its value cannot be read.
pub fn extract(text: &str, metric: Metric) -> Option<f64> {
    if metric.is_duration() {
        extract_seconds(text, metric)
    } else {
        extract_count(text, metric).map(|count| count as f64)
    }
}

/// Like [`extract`], keeping the full precision of a count
pub fn extract_count(text: &str, metric: Metric) -> Option<u64> {
    parse_count(token(text, metric)?)
}

/// Like [`extract`], reading the value as a duration in seconds
pub fn extract_seconds(text: &str, metric: Metric) -> Option<f64> {
    parse_duration(token(text, metric)?)
}

fn token(text: &str, metric: Metric) -> Option<&str> {
    Some(metric.pattern().captures(text)?.get(1)?.as_str())
}

/// Scrape every known metric, defaulting the missing ones to zero
pub fn scrape(text: &str) -> RunResult {
    let count = |metric| extract_count(text, metric).unwrap_or(0);
    let seconds = |metric| extract_seconds(text, metric).unwrap_or(0.0);

    RunResult {
        connection_time: seconds(Metric::ConnectionTime),
        rows_inserted: count(Metric::RowsGenerated),
        insertion_time: seconds(Metric::GenerationTime),
        reported_rate: count(Metric::RowsInsertedPerSec),
    }
}

/// Parse a comma grouped integer such as `1,234,567`
pub fn parse_count(token: &str) -> Option<u64> {
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

/// Parse `00:01:30.500` or `90.5` into seconds
///
/// The hour field is unbounded, so runs of a day or more still parse.
pub fn parse_duration(token: &str) -> Option<f64> {
    match token.split_once(':') {
        Some((hours, rest)) => {
            let hours: u64 = hours.parse().ok()?;
            let within = NaiveTime::parse_from_str(&format!("00:{}", rest), "%H:%M:%S%.f").ok()?;
            Some(hours as f64 * 3600.0 + within.num_seconds_from_midnight() as f64 + within.nanosecond() as f64 / 1e9)
        }
        None => token.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANNER: &str = "\
Connection Time                        00:00:02.250
Data Generation Time                   00:01:30.500
Actual Rows Generated                  1,234,567
Rows Inserted per sec                  12,345
";

    #[test]
    fn test_extract_grouped_count() {
        assert_eq!(extract("Rows Inserted per sec   12,345", Metric::RowsInsertedPerSec), Some(12345.0));
        assert_eq!(extract(BANNER, Metric::RowsGenerated), Some(1_234_567.0));
    }

    #[test]
    fn test_missing_label_is_none() {
        assert_eq!(extract("nothing to see", Metric::RowsInsertedPerSec), None);
        assert_eq!(scrape("nothing to see").reported_rate, 0);
    }

    #[test]
    fn test_label_without_value_is_none() {
        assert_eq!(extract("Rows Inserted per sec\n", Metric::RowsInsertedPerSec), None);
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Rows Inserted per sec 10\nRows Inserted per sec 20\n";
        assert_eq!(extract(text, Metric::RowsInsertedPerSec), Some(10.0));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("00:01:30.500"), Some(90.5));
        assert_eq!(parse_duration("01:00:00"), Some(3600.0));
        assert_eq!(parse_duration("12.25"), Some(12.25));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("1:2"), None);
        assert_eq!(parse_duration("00:61:00"), None);
    }

    #[test]
    fn test_parse_duration_past_one_day() {
        assert_eq!(parse_duration("25:00:00.000"), Some(90_000.0));
        assert_eq!(parse_duration("100:00:01.500"), Some(360_001.5));

        let result = scrape("Data Generation Time 26:00:00\nActual Rows Generated 936,000\n");
        assert_eq!(result.insertion_time, 93_600.0);
    }

    #[test]
    fn test_counts_keep_full_precision() {
        let text = "Actual Rows Generated 9,007,199,254,740,993\n";

        assert_eq!(extract_count(text, Metric::RowsGenerated), Some(9_007_199_254_740_993));
        assert_eq!(scrape(text).rows_inserted, 9_007_199_254_740_993);
    }

    #[test]
    fn test_scrape_full_banner() {
        let result = scrape(BANNER);

        assert_eq!(
            result,
            RunResult {
                connection_time: 2.25,
                rows_inserted: 1_234_567,
                insertion_time: 90.5,
                reported_rate: 12_345,
            }
        );
    }

    #[test]
    fn test_scrape_plain_second_timings() {
        let text = "Connection Time 0.75\nData Generation Time 4.5\nActual Rows Generated 900\n";
        let result = scrape(text);

        assert_eq!(result.connection_time, 0.75);
        assert_eq!(result.insertion_time, 4.5);
        assert_eq!(result.rows_inserted, 900);
        assert_eq!(result.reported_rate, 0);
    }
}
