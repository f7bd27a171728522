//! Report layout and rendering.
//!
//! - pure sheet layout: widths + per-cell values and emphasis (`layout`)
//! - spreadsheet writing (`xlsx`)
//! - terminal run summary (`format`)
//!
//! Column order and styling come from `domain::REPORT_COLUMNS`; nothing here
//! indexes columns by letter or position.

use chrono::NaiveDate;

use crate::domain::{Provenance, ReportTable};

pub mod format;
pub mod layout;
pub mod xlsx;

pub use format::*;
pub use layout::*;
pub use xlsx::*;

/// Row counts for the terminal summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub observed: usize,
    pub interpolated: usize,
    pub absent: usize,
    pub newest: Option<NaiveDate>,
    pub oldest: Option<NaiveDate>,
}

impl RunStats {
    pub fn from_table(table: &ReportTable) -> Self {
        let mut stats = RunStats {
            rows: table.rows.len(),
            newest: table.rows.first().map(|r| r.date),
            oldest: table.rows.last().map(|r| r.date),
            ..RunStats::default()
        };
        for row in &table.rows {
            match row.liquidity.map(|c| c.provenance) {
                Some(Provenance::Observed) => stats.observed += 1,
                Some(Provenance::Interpolated) => stats.interpolated += 1,
                None => stats.absent += 1,
            }
        }
        stats
    }
}
