//! Shared domain types.
//!
//! Everything here is plain data: values are constructed once per run and are
//! never shared across runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::Column;
use crate::error::PipelineError;

/// A single sub-daily price observation.
///
/// Timestamps are naive: the price collaborator has already resolved them to the
/// local wall clock, and the core never converts timezones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A single macro-series data point at its native (monthly) cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Date-keyed, duplicate-free numeric series at daily granularity.
///
/// Backed by a `BTreeMap`, so iteration is always ascending by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from `(date, value)` pairs, rejecting repeated dates.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, PipelineError> {
        let mut series = Self::new();
        for (date, value) in entries {
            series.insert(date, value)?;
        }
        Ok(series)
    }

    /// Insert a value for a date that is not yet present.
    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Result<(), PipelineError> {
        if self.values.contains_key(&date) {
            return Err(PipelineError::invalid_input(format!(
                "duplicate date {date} in daily series"
            )));
        }
        self.values.insert(date, value);
        Ok(())
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }
}

/// Whether a daily value was reported by the source or derived by interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Observed,
    Interpolated,
}

/// Provenance tags, co-indexed with a `DailySeries`.
pub type ProvenanceTags = BTreeMap<NaiveDate, Provenance>;

/// A daily macro series together with one provenance tag per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseSeries {
    pub values: DailySeries,
    pub tags: ProvenanceTags,
}

/// A liquidity value attached to a report row, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityCell {
    pub value: f64,
    pub provenance: Provenance,
}

/// One report row per price date.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub date: NaiveDate,
    pub price: f64,
    /// `None` when the macro series has no coverage for this date.
    pub liquidity: Option<LiquidityCell>,
    /// Placeholder for manual analyst input. Never computed.
    pub expected_price: Option<f64>,
}

/// Merged rows, newest first, plus the fixed column declaration used to render them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub columns: &'static [Column],
    pub rows: Vec<MergedRow>,
}

/// The configuration the core pipeline accepts.
///
/// Derived from CLI flags by the binary; nothing here is read from the environment.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Trailing window for price history (days).
    pub price_days: u32,
    /// Trailing window for macro history (days).
    pub macro_days: u32,
    /// Destination artifact path.
    pub output: PathBuf,
    /// Run date; the macro window ends here.
    pub as_of: NaiveDate,
}
