//! FRED API integration for the macro liquidity series.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::MacroSource;
use crate::domain::Observation;
use crate::error::{AppError, PipelineError};

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Monthly M2 money stock, seasonally adjusted (billions of USD).
pub const DEFAULT_SERIES: &str = "M2SL";

pub struct FredClient {
    client: Client,
    api_key: String,
    series_id: String,
}

impl FredClient {
    pub fn from_env(series_id: impl Into<String>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::new(2, "Missing FRED_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
            series_id: series_id.into(),
        })
    }
}

impl MacroSource for FredClient {
    fn fetch_observations(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Observation>, PipelineError> {
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", self.series_id.as_str()),
                ("api_key", &self.api_key),
                ("file_type", "json"),
                ("sort_order", "asc"),
                ("observation_start", &start.to_string()),
                ("observation_end", &end.to_string()),
            ])
            .send()
            .map_err(|e| PipelineError::fetch(format!("FRED request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(PipelineError::fetch(format!(
                "FRED request failed with status {}.",
                resp.status()
            )));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| PipelineError::fetch(format!("Failed to parse FRED response: {e}")))?;

        let out = observations_from_response(body)?;
        debug!(series = %self.series_id, %start, %end, observations = out.len(), "fetched macro observations");
        Ok(out)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

fn observations_from_response(body: ObservationsResponse) -> Result<Vec<Observation>, PipelineError> {
    let mut out = Vec::with_capacity(body.observations.len());
    for obs in body.observations {
        let value = match parse_value(&obs.value) {
            Some(v) => v,
            None => continue,
        };
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| PipelineError::fetch(format!("Invalid FRED date '{}': {e}", obs.date)))?;
        out.push(Observation::new(date, value));
    }
    Ok(out)
}

/// FRED marks missing values with `"."`.
pub(crate) fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
