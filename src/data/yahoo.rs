//! Yahoo Finance chart API client
//!
//! Fetches historical OHLCV bars from the public v8 chart endpoint. Bars
//! with missing quote fields (Yahoo emits nulls for halted intervals) are
//! skipped, and the resulting series is validated before it is returned.

use super::{validate_series, DataError, PriceBar, PriceProvider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance API base URL
pub const YAHOO_API_URL: &str = "https://query1.finance.yahoo.com";

/// Configuration for the Yahoo client
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the chart API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for Yahoo Finance historical chart data
pub struct YahooClient {
    config: YahooConfig,
    client: Client,
}

impl YahooClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(YahooConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: YahooConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent("sma-trader/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch the chart for a symbol over a range/interval
    ///
    /// `range` uses Yahoo notation (1d, 5d, 1mo, 1y, ...), `interval`
    /// likewise (1m, 5m, 15m, 1d, ...).
    pub async fn fetch_chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, DataError> {
        let url = format!("{}/v8/finance/chart/{}", self.config.base_url, symbol);

        tracing::debug!(url = %url, range, interval, "Fetching chart from Yahoo Finance");

        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(DataError::MalformedPayload {
                symbol: symbol.to_string(),
                reason: format!("HTTP status {}", status),
            });
        }

        let payload: ChartResponse = response.json().await?;
        let bars = convert_chart(symbol, payload)?;

        validate_series(symbol, &bars)?;

        tracing::debug!(symbol, bar_count = bars.len(), "Fetched price series");
        Ok(bars)
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for YahooClient {
    async fn fetch(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, DataError> {
        self.fetch_chart(symbol, period, interval).await
    }
}

/// Top-level chart API response
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

/// Parallel arrays of quote data; nulls mark intervals without trades
#[derive(Debug, Deserialize, Default)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Convert a chart payload into a price series
fn convert_chart(symbol: &str, payload: ChartResponse) -> Result<Vec<PriceBar>, DataError> {
    if let Some(error) = payload.chart.error {
        if !error.is_null() {
            return Err(DataError::MalformedPayload {
                symbol: symbol.to_string(),
                reason: error.to_string(),
            });
        }
    }

    let result = payload
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| DataError::UnknownSymbol(symbol.to_string()))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| DataError::EmptySeries(symbol.to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::MalformedPayload {
            symbol: symbol.to_string(),
            reason: "missing quote block".to_string(),
        })?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let close = match quote.close.get(i).copied().flatten() {
            Some(c) => c,
            None => continue, // no trade in this interval
        };
        let Some(timestamp) = DateTime::<Utc>::from_timestamp(*ts, 0) else {
            continue;
        };

        let close = decimal_from(close, symbol)?;
        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();

        bars.push(PriceBar {
            timestamp,
            open: open.map_or(Ok(close), |v| decimal_from(v, symbol))?,
            high: high.map_or(Ok(close), |v| decimal_from(v, symbol))?,
            low: low.map_or(Ok(close), |v| decimal_from(v, symbol))?,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    if bars.is_empty() {
        return Err(DataError::EmptySeries(symbol.to_string()));
    }

    Ok(bars)
}

fn decimal_from(value: f64, symbol: &str) -> Result<Decimal, DataError> {
    Decimal::from_f64(value).ok_or_else(|| DataError::MalformedPayload {
        symbol: symbol.to_string(),
        reason: format!("unrepresentable price {}", value),
    })
}
