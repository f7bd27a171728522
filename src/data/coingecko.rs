//! CoinGecko market-chart integration for the price series.

use chrono::{Local, NaiveDateTime, TimeZone};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::PriceSource;
use crate::domain::Sample;
use crate::error::{AppError, PipelineError};

const BASE_URL: &str = "https://api.coingecko.com/api/v3/coins";
const DEMO_KEY_HEADER: &str = "x-cg-demo-api-key";

pub struct CoinGeckoClient {
    client: Client,
    coin: String,
    vs_currency: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Build a client; `COINGECKO_API_KEY` (optional) is read from the environment / `.env`.
    pub fn from_env(coin: impl Into<String>, vs_currency: impl Into<String>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("COINGECKO_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let client = Client::builder()
            .user_agent(concat!("lqr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            coin: coin.into(),
            vs_currency: vs_currency.into(),
            api_key,
        })
    }
}

impl PriceSource for CoinGeckoClient {
    fn fetch_samples(&self, days: u32) -> Result<Vec<Sample>, PipelineError> {
        let url = format!("{BASE_URL}/{}/market_chart", self.coin);
        let mut req = self
            .client
            .get(&url)
            .query(&[("vs_currency", self.vs_currency.as_str()), ("days", &days.to_string())]);
        if let Some(key) = &self.api_key {
            req = req.header(DEMO_KEY_HEADER, key);
        }

        let resp = req
            .send()
            .map_err(|e| PipelineError::fetch(format!("CoinGecko request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(PipelineError::fetch(format!(
                "CoinGecko request failed with status {}.",
                resp.status()
            )));
        }

        let body: MarketChartResponse = resp
            .json()
            .map_err(|e| PipelineError::fetch(format!("Failed to parse CoinGecko response: {e}")))?;

        let samples = samples_from_chart(&body.prices);
        debug!(coin = %self.coin, days, samples = samples.len(), "fetched price samples");
        Ok(samples)
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// Convert `[epoch_ms, price]` pairs into local-time samples, oldest first.
fn samples_from_chart(points: &[(f64, f64)]) -> Vec<Sample> {
    let mut out = Vec::with_capacity(points.len());
    for &(ms, price) in points {
        let Some(timestamp) = local_naive(ms) else {
            warn!(ms, "skipping price point with unrepresentable timestamp");
            continue;
        };
        if !price.is_finite() {
            warn!(%timestamp, "skipping non-finite price point");
            continue;
        }
        out.push(Sample::new(timestamp, price));
    }
    out.sort_by_key(|s| s.timestamp);
    out
}

fn local_naive(epoch_ms: f64) -> Option<NaiveDateTime> {
    if !epoch_ms.is_finite() {
        return None;
    }
    Local
        .timestamp_millis_opt(epoch_ms as i64)
        .earliest()
        .map(|dt| dt.naive_local())
}
