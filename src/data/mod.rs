//! Historical price data module
//!
//! Provides the `PriceProvider` abstraction over historical data sources,
//! series validation at the boundary, and a Yahoo Finance implementation.

mod memory;
mod types;
mod yahoo;

pub use memory::StaticProvider;
pub use types::PriceBar;
pub use yahoo::{YahooClient, YahooConfig, YAHOO_API_URL};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from price retrieval and series validation
#[derive(Debug, Error)]
pub enum DataError {
    /// No data returned for the symbol
    #[error("No price data available for {0}")]
    UnknownSymbol(String),
    /// Provider returned an empty series
    #[error("Empty price series for {0}")]
    EmptySeries(String),
    /// Timestamps not strictly ascending
    #[error("Price series for {symbol} out of order at index {index}")]
    OutOfOrder { symbol: String, index: usize },
    /// Two bars share a timestamp
    #[error("Duplicate timestamp in price series for {symbol} at index {index}")]
    DuplicateTimestamp { symbol: String, index: usize },
    /// Response body did not match the expected shape
    #[error("Malformed chart payload for {symbol}: {reason}")]
    MalformedPayload { symbol: String, reason: String },
    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Trait for historical price data sources
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch a validated, time-ordered price series for `symbol`
    ///
    /// `period` and `interval` use the provider's range notation
    /// (e.g. "1mo" / "5m").
    async fn fetch(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, DataError>;
}

/// Validate a price series before it reaches the core
///
/// Timestamps must be strictly ascending with no duplicates. The core
/// assumes this holds, so providers run every series through here.
pub fn validate_series(symbol: &str, bars: &[PriceBar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::EmptySeries(symbol.to_string()));
    }

    for (index, window) in bars.windows(2).enumerate() {
        let (prev, next) = (&window[0], &window[1]);
        if next.timestamp == prev.timestamp {
            return Err(DataError::DuplicateTimestamp {
                symbol: symbol.to_string(),
                index: index + 1,
            });
        }
        if next.timestamp < prev.timestamp {
            return Err(DataError::OutOfOrder {
                symbol: symbol.to_string(),
                index: index + 1,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn bars_at_minutes(offsets: &[i64]) -> Vec<PriceBar> {
        let start = Utc::now();
        offsets
            .iter()
            .map(|m| PriceBar::at_close(start + Duration::minutes(*m), dec!(100)))
            .collect()
    }

    #[test]
    fn test_validate_ordered_series() {
        let bars = bars_at_minutes(&[0, 1, 2, 3]);
        assert!(validate_series("AAPL", &bars).is_ok());
    }

    #[test]
    fn test_validate_empty_series() {
        let result = validate_series("AAPL", &[]);
        assert!(matches!(result, Err(DataError::EmptySeries(_))));
    }

    #[test]
    fn test_validate_duplicate_timestamp() {
        let bars = bars_at_minutes(&[0, 1, 1, 2]);
        let result = validate_series("AAPL", &bars);
        assert!(matches!(
            result,
            Err(DataError::DuplicateTimestamp { index: 2, .. })
        ));
    }

    #[test]
    fn test_validate_out_of_order() {
        let bars = bars_at_minutes(&[0, 2, 1]);
        let result = validate_series("AAPL", &bars);
        assert!(matches!(result, Err(DataError::OutOfOrder { index: 2, .. })));
    }

    #[test]
    fn test_single_bar_series_is_valid() {
        let bars = bars_at_minutes(&[0]);
        assert!(validate_series("AAPL", &bars).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = DataError::EmptySeries("MSFT".to_string());
        assert_eq!(err.to_string(), "Empty price series for MSFT");

        let err = DataError::UnknownSymbol("MSFT".to_string());
        assert_eq!(err.to_string(), "No price data available for MSFT");
    }
}
