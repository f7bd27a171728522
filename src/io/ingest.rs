//! Offline CSV sources.
//!
//! These stand in for the network clients when the data is already on disk:
//!
//! - prices: `timestamp,price` with naive timestamps (`2024-03-01 13:00:00`
//!   or `2024-03-01T13:00:00`)
//! - macro: `date,value` with `YYYY-MM-DD` dates; `.` or empty values are
//!   missing and skipped, as in FRED exports
//!
//! Any unreadable file or malformed row fails the fetch with the file and line.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Deserialize;
use tracing::debug;

use crate::data::fred::parse_value;
use crate::data::{MacroSource, PriceSource};
use crate::domain::{Observation, Sample};
use crate::error::PipelineError;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Deserialize)]
struct PriceRow {
    timestamp: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct MacroRow {
    date: String,
    value: String,
}

/// Price samples read from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for CsvPriceSource {
    /// Rows within `days` of the latest timestamp in the file, oldest first.
    fn fetch_samples(&self, days: u32) -> Result<Vec<Sample>, PipelineError> {
        let mut samples = Vec::new();
        for_each_row(&self.path, |line, row: PriceRow| {
            let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| {
                row_error(&self.path, line, format!("invalid timestamp '{}'", row.timestamp))
            })?;
            samples.push(Sample::new(timestamp, row.price));
            Ok(())
        })?;

        samples.sort_by_key(|s| s.timestamp);
        if let Some(latest) = samples.last().map(|s| s.timestamp) {
            let cutoff = latest - Duration::days(i64::from(days));
            samples.retain(|s| s.timestamp >= cutoff);
        }

        debug!(path = %self.path.display(), days, samples = samples.len(), "loaded price samples");
        Ok(samples)
    }
}

/// Macro observations read from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvMacroSource {
    path: PathBuf,
}

impl CsvMacroSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MacroSource for CsvMacroSource {
    fn fetch_observations(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Observation>, PipelineError> {
        let mut out = Vec::new();
        let mut skipped = 0usize;
        for_each_row(&self.path, |line, row: MacroRow| {
            let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
                .map_err(|e| row_error(&self.path, line, format!("invalid date '{}': {e}", row.date)))?;
            let Some(value) = parse_value(&row.value) else {
                skipped += 1;
                return Ok(());
            };
            if date >= start && date <= end {
                out.push(Observation::new(date, value));
            }
            Ok(())
        })?;

        out.sort_by_key(|o| o.date);
        debug!(
            path = %self.path.display(),
            %start,
            %end,
            observations = out.len(),
            skipped,
            "loaded macro observations"
        );
        Ok(out)
    }
}

/// Deserialize every record, handing `(line, row)` to `f`.
fn for_each_row<T, F>(path: &Path, mut f: F) -> Result<(), PipelineError>
where
    T: for<'de> Deserialize<'de>,
    F: FnMut(u64, T) -> Result<(), PipelineError>,
{
    let file = File::open(path)
        .map_err(|e| PipelineError::fetch(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|e| row_error(path, 1, e))?
        .clone();

    let mut record = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| row_error(path, e.position().map_or(0, |p| p.line()), &e))?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, |p| p.line());
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| row_error(path, line, e))?;
        f(line, row)?;
    }
    Ok(())
}

fn row_error(path: &Path, line: u64, msg: impl std::fmt::Display) -> PipelineError {
    PipelineError::fetch(format!("{}:{line}: {msg}", path.display()))
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn price_csv_keeps_trailing_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(
            &path,
            "timestamp,price\n\
             2024-03-05 12:00:00,105\n\
             2024-03-01 00:00:00,100\n\
             2024-03-04T06:30:00,104\n",
        )
        .unwrap();

        let samples = CsvPriceSource::new(&path).fetch_samples(2).unwrap();
        let values: Vec<_> = samples.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![104.0, 105.0]);
    }

    #[test]
    fn macro_csv_filters_to_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m2.csv");
        fs::write(&path, "date,value\n2024-01-01,1\n2024-02-01,2\n2024-03-01,3\n").unwrap();

        let obs = CsvMacroSource::new(&path)
            .fetch_observations(d(2024, 1, 15), d(2024, 3, 1))
            .unwrap();
        let dates: Vec<_> = obs.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![d(2024, 2, 1), d(2024, 3, 1)]);
    }

    #[test]
    fn macro_csv_skips_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m2.csv");
        fs::write(&path, "date,value\n2024-01-01,1\n2024-02-01,.\n2024-03-01,\n2024-04-01,4\n").unwrap();

        let obs = CsvMacroSource::new(&path)
            .fetch_observations(d(2024, 1, 1), d(2024, 4, 1))
            .unwrap();
        assert_eq!(
            obs,
            vec![Observation::new(d(2024, 1, 1), 1.0), Observation::new(d(2024, 4, 1), 4.0)]
        );
    }

    #[test]
    fn malformed_rows_are_fetch_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "timestamp,price\nyesterday,100\n").unwrap();
        let err = CsvPriceSource::new(&path).fetch_samples(30).unwrap_err();
        assert!(matches!(err, PipelineError::Fetch(_)));
        assert!(err.to_string().contains("yesterday"));

        let missing = CsvMacroSource::new(dir.path().join("nope.csv"));
        assert!(matches!(
            missing.fetch_observations(d(2024, 1, 1), d(2024, 2, 1)),
            Err(PipelineError::Fetch(_))
        ));
    }
}
