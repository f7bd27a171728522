//! Time-series alignment.
//!
//! Responsibilities:
//!
//! - reduce sub-daily price samples to daily means (`aggregate`)
//! - expand the sparse macro series to daily values with provenance (`densify`)
//! - left-join both daily series on date into the report table (`merge`)

pub mod aggregate;
pub mod interpolate;
pub mod merge;

pub use aggregate::*;
pub use interpolate::*;
pub use merge::*;
