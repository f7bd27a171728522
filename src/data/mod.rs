//! Data collaborators.
//!
//! The pipeline only sees the two traits below. Network clients live here;
//! offline CSV sources live in `crate::io::ingest`.

use chrono::NaiveDate;

use crate::domain::{Observation, Sample};
use crate::error::PipelineError;

pub mod coingecko;
pub mod fred;

pub use coingecko::CoinGeckoClient;
pub use fred::FredClient;

/// Supplies sub-daily price samples in ascending time order.
pub trait PriceSource {
    /// Samples covering the trailing `days` window.
    fn fetch_samples(&self, days: u32) -> Result<Vec<Sample>, PipelineError>;
}

/// Supplies macro observations in ascending date order.
pub trait MacroSource {
    /// Observations dated within `[start, end]`.
    fn fetch_observations(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Observation>, PipelineError>;
}
