//! Trade log types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Executed trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// One executed trade, recorded at execution time
///
/// Entries are immutable and the log is append-only, ordered by execution
/// time. This is the sole artifact the analytics layer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeLogEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Bar timestamp at which the fill occurred
    pub timestamp: DateTime<Utc>,
    /// Instrument symbol
    pub symbol: String,
    /// Buy or sell
    pub action: TradeAction,
    /// Fill price (the bar close; fills are assumed exact, no slippage)
    pub price: Decimal,
    /// Shares traded
    pub quantity: u64,
    /// Realized P&L, present only for sells
    pub realized_pnl: Option<Decimal>,
    /// Total portfolio value snapshot at log time
    pub portfolio_value: Decimal,
}
