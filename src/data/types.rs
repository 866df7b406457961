//! Price series types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV bar from a historical price series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar timestamp (open time)
    pub timestamp: DateTime<Utc>,
    /// Open price
    pub open: Decimal,
    /// High price
    pub high: Decimal,
    /// Low price
    pub low: Decimal,
    /// Close price (the only field the core logic reads)
    pub close: Decimal,
    /// Traded volume
    pub volume: u64,
}

impl PriceBar {
    /// Construct a bar where all four prices equal `close`
    ///
    /// Convenient for tests and synthetic series; the simulator only
    /// looks at `close`.
    pub fn at_close(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}
