//! The report pipeline shared by the binary and the integration tests.
//!
//! fetch prices -> aggregate -> fetch macro -> densify -> merge -> render
//!
//! Every stage returns a typed error and any failure aborts the run before the
//! artifact is written.

use std::path::PathBuf;

use chrono::Duration;
use tracing::info;

use crate::data::{MacroSource, PriceSource};
use crate::domain::{DenseSeries, ReportTable, RunConfig};
use crate::error::PipelineError;
use crate::report::RunStats;
use crate::series::{aggregate, densify, merge};

/// All outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub artifact: PathBuf,
    pub table: ReportTable,
    pub stats: RunStats,
}

/// Execute the full pipeline against the given collaborators.
pub fn run_report(
    config: &RunConfig,
    prices: &dyn PriceSource,
    macro_source: &dyn MacroSource,
) -> Result<RunOutput, PipelineError> {
    // 1) Daily price series.
    let samples = prices.fetch_samples(config.price_days)?;
    let daily_prices = aggregate(&samples)?;
    info!(samples = samples.len(), days = daily_prices.len(), "aggregated price samples");

    // 2) Dense macro series over the span of price dates.
    let macro_start = config.as_of - Duration::days(i64::from(config.macro_days));
    let observations = macro_source.fetch_observations(macro_start, config.as_of)?;

    let dense = match (daily_prices.first_date(), daily_prices.last_date()) {
        (Some(first), Some(last)) => densify(&observations, first, last)?,
        _ => DenseSeries::default(),
    };
    info!(
        observations = observations.len(),
        daily = dense.values.len(),
        "densified macro series"
    );

    // 3) Merge and render.
    let table = merge(&daily_prices, &dense.values, &dense.tags)?;
    let artifact = crate::report::render(&table, &config.output)?;
    let stats = RunStats::from_table(&table);

    Ok(RunOutput { artifact, table, stats })
}
