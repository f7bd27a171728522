//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - picks the price / macro collaborators (network or CSV)
//! - runs the pipeline
//! - prints the run summary

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use clap::Parser;

use crate::cli::Cli;
use crate::data::{CoinGeckoClient, FredClient, MacroSource, PriceSource};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::io::{CsvMacroSource, CsvPriceSource};

pub mod pipeline;

/// Entry point for the `lqr` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let now = Local::now().naive_local();
    let config = run_config_from_args(&cli, now)?;

    let prices: Box<dyn PriceSource> = match &cli.prices_csv {
        Some(path) => Box::new(CsvPriceSource::new(path)),
        None => Box::new(CoinGeckoClient::from_env(&cli.coin, &cli.vs_currency)?),
    };
    let macro_source: Box<dyn MacroSource> = match &cli.macro_csv {
        Some(path) => Box::new(CsvMacroSource::new(path)),
        None => Box::new(FredClient::from_env(&cli.series)?),
    };

    let run = pipeline::run_report(&config, prices.as_ref(), macro_source.as_ref())?;
    println!("{}", crate::report::format_run_summary(&run.artifact, &run.stats));
    Ok(())
}

pub fn run_config_from_args(cli: &Cli, now: NaiveDateTime) -> Result<RunConfig, AppError> {
    if cli.price_days == 0 {
        return Err(AppError::new(2, "--price-days must be at least 1."));
    }
    Ok(RunConfig {
        price_days: cli.price_days,
        macro_days: cli.macro_days,
        output: cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&cli.output_dir, now)),
        as_of: now.date(),
    })
}

/// `<dir>/bitcoin_prices_<YYYYmmdd_HHMMSS>.xlsx`, unique per run second.
pub fn default_output_path(dir: &std::path::Path, now: NaiveDateTime) -> PathBuf {
    dir.join(format!("bitcoin_prices_{}.xlsx", now.format("%Y%m%d_%H%M%S")))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn default_path_is_timestamped() {
        let cli = Cli::parse_from(["lqr", "--output-dir", "out"]);
        let config = run_config_from_args(&cli, now()).unwrap();
        assert_eq!(config.output, PathBuf::from("out/bitcoin_prices_20240304_090507.xlsx"));
        assert_eq!(config.price_days, 90);
        assert_eq!(config.macro_days, 365);
        assert_eq!(config.as_of, now().date());
    }

    #[test]
    fn explicit_output_wins() {
        let cli = Cli::parse_from(["lqr", "-o", "x/report.xlsx", "--price-days", "30"]);
        let config = run_config_from_args(&cli, now()).unwrap();
        assert_eq!(config.output, PathBuf::from("x/report.xlsx"));
        assert_eq!(config.price_days, 30);
    }

    #[test]
    fn zero_price_window_is_a_config_error() {
        let cli = Cli::parse_from(["lqr", "--price-days", "0"]);
        let err = run_config_from_args(&cli, now()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
