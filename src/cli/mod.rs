//! Command-line parsing for the price vs. liquidity report.

use std::path::PathBuf;

use clap::Parser;

use crate::data::fred::DEFAULT_SERIES;

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(name = "lqr", version, about = "Daily crypto price vs. macro liquidity report (xlsx)")]
pub struct Cli {
    /// Trailing window of price history (days).
    #[arg(long, default_value_t = 90)]
    pub price_days: u32,

    /// Trailing window of macro history (days).
    #[arg(long, default_value_t = 365)]
    pub macro_days: u32,

    /// Write the report here instead of a timestamped file in `--output-dir`.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Directory for timestamped reports.
    #[arg(long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// CoinGecko coin id.
    #[arg(long, default_value = "bitcoin")]
    pub coin: String,

    /// Quote currency for prices.
    #[arg(long, default_value = "usd")]
    pub vs_currency: String,

    /// FRED series id for the liquidity column.
    #[arg(long, default_value = DEFAULT_SERIES)]
    pub series: String,

    /// Read price samples from a CSV (`timestamp,price`) instead of CoinGecko.
    #[arg(long, value_name = "CSV")]
    pub prices_csv: Option<PathBuf>,

    /// Read macro observations from a CSV (`date,value`) instead of FRED.
    #[arg(long, value_name = "CSV")]
    pub macro_csv: Option<PathBuf>,
}
