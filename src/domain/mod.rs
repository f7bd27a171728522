//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw collaborator inputs (`Sample`, `Observation`)
//! - daily-granularity series and their provenance (`DailySeries`, `Provenance`)
//! - the merged report table and its fixed schema (`MergedRow`, `ReportTable`, `REPORT_COLUMNS`)
//! - the run configuration seen by the core (`RunConfig`)

pub mod columns;
pub mod types;

pub use columns::*;
pub use types::*;
