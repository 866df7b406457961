//! In-memory price provider for tests and canned replays

use super::{validate_series, DataError, PriceBar, PriceProvider};
use async_trait::async_trait;
use std::collections::HashMap;

/// Serves pre-loaded price series from memory
///
/// Used by the integration tests and anywhere a deterministic replay is
/// needed without network access. `period` and `interval` are ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<String, Vec<PriceBar>>,
}

impl StaticProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series for a symbol, replacing any existing one
    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.series.insert(symbol.into(), bars);
        self
    }
}

#[async_trait]
impl PriceProvider for StaticProvider {
    async fn fetch(
        &self,
        symbol: &str,
        _period: &str,
        _interval: &str,
    ) -> Result<Vec<PriceBar>, DataError> {
        let bars = self
            .series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::UnknownSymbol(symbol.to_string()))?;
        validate_series(symbol, &bars)?;
        Ok(bars)
    }
}
