//! Open position value object

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One open holding in a single symbol
///
/// Created by the risk manager on entry; `current_price` is the only
/// field mutated afterwards. The stop price is fixed at entry (no
/// trailing stop).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Instrument symbol
    pub symbol: String,
    /// Share count, always > 0 while open
    pub quantity: u64,
    /// Fill price at entry
    pub entry_price: Decimal,
    /// Last seen price
    pub current_price: Decimal,
    /// Price at or below which the position is force-closed
    pub stop_loss_price: Decimal,
}

impl Position {
    /// Notional value at the current price
    pub fn position_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.current_price
    }

    /// Mark-to-market P&L against the entry price
    pub fn unrealized_pnl(&self) -> Decimal {
        Decimal::from(self.quantity) * (self.current_price - self.entry_price)
    }

    /// Stop distance as a signed percentage of the entry price
    pub fn stop_loss_pct(&self) -> Decimal {
        (self.stop_loss_price - self.entry_price) / self.entry_price * dec!(100)
    }
}
