//! Portfolio risk manager
//!
//! Owns the cash balance and the position book. Every entry is gated by
//! `can_open_position`; exits happen on request or automatically when a
//! price update breaches the stop. Cash is only mutated on close, by the
//! realized P&L of the closed position; opening does not debit cash, and
//! exposure is tracked separately for the risk checks.

use super::{OpenRefusal, Position};
use crate::config::RiskConfig;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// Fixed-field snapshot of portfolio state and risk metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioStatus {
    /// Cash plus open position value
    pub total_value: Decimal,
    /// Cash balance
    pub cash: Decimal,
    /// Sum of open position values
    pub positions_value: Decimal,
    /// Number of open positions
    pub position_count: usize,
    /// Return over initial capital, in percent
    pub portfolio_return_pct: Decimal,
}

/// Gates entries against risk limits and tracks capital and positions
pub struct RiskManager {
    initial_capital: Decimal,
    current_capital: Decimal,
    limits: RiskConfig,
    positions: HashMap<String, Position>,
}

impl RiskManager {
    /// Create a risk manager with the given starting cash and limits
    pub fn new(initial_capital: Decimal, limits: RiskConfig) -> Self {
        Self {
            initial_capital,
            current_capital: initial_capital,
            limits,
            positions: HashMap::new(),
        }
    }

    /// Maximum share count sizeable into one new position at `price`
    ///
    /// `floor(current_capital * max_position_size_pct / price)`; returns 0
    /// for non-positive prices or when the sizeable notional rounds below
    /// one share. Callers treat 0 as "cannot open".
    pub fn calculate_position_size(&self, price: Decimal) -> u64 {
        if price <= Decimal::ZERO {
            return 0;
        }
        let max_position_value = self.current_capital * self.limits.max_position_size_pct;
        (max_position_value / price).floor().to_u64().unwrap_or(0)
    }

    /// Check whether a new position in `symbol` may be opened at `price`
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// already-open, position count, degenerate size, per-position
    /// notional, aggregate portfolio exposure.
    pub fn can_open_position(&self, symbol: &str, price: Decimal) -> Result<(), OpenRefusal> {
        if self.positions.contains_key(symbol) {
            return Err(OpenRefusal::AlreadyOpen(symbol.to_string()));
        }

        if self.positions.len() >= self.limits.max_positions {
            return Err(OpenRefusal::MaxPositionsReached);
        }

        let quantity = self.calculate_position_size(price);
        if quantity == 0 {
            return Err(OpenRefusal::ZeroQuantity);
        }
        let position_value = Decimal::from(quantity) * price;

        if position_value > self.current_capital * self.limits.max_position_size_pct {
            return Err(OpenRefusal::PositionTooLarge);
        }

        let total_risk: Decimal = self
            .positions
            .values()
            .map(Position::position_value)
            .sum::<Decimal>()
            + position_value;

        if total_risk > self.current_capital * self.limits.max_portfolio_risk_pct {
            return Err(OpenRefusal::PortfolioRiskExceeded);
        }

        Ok(())
    }

    /// Open a position if the risk checks allow it
    ///
    /// On refusal, logs the reason and returns `None`; the caller skips
    /// logging a trade.
    pub fn open_position(&mut self, symbol: &str, price: Decimal) -> Option<Position> {
        if let Err(reason) = self.can_open_position(symbol, price) {
            tracing::info!(symbol, %reason, "Cannot open position");
            return None;
        }

        let quantity = self.calculate_position_size(price);
        let stop_loss_price = price * (Decimal::ONE - self.limits.stop_loss_pct);

        let position = Position {
            symbol: symbol.to_string(),
            quantity,
            entry_price: price,
            current_price: price,
            stop_loss_price,
        };

        tracing::info!(
            symbol,
            quantity,
            %price,
            stop = %stop_loss_price,
            "Opened position"
        );

        self.positions.insert(symbol.to_string(), position.clone());
        Some(position)
    }

    /// Mark a position to `current_price` and enforce the stop
    ///
    /// No-op for symbols without an open position. If the new price is at
    /// or below the stop, the position is force-closed immediately and the
    /// realized P&L returned; this exit is signal-independent and takes
    /// priority over anything else on the bar.
    pub fn update_position(&mut self, symbol: &str, current_price: Decimal) -> Option<Decimal> {
        let stop_loss_price = {
            let position = self.positions.get_mut(symbol)?;
            position.current_price = current_price;
            position.stop_loss_price
        };

        if current_price <= stop_loss_price {
            let pnl = self.close_position(symbol);
            tracing::info!(symbol, %current_price, "Stop loss triggered");
            return pnl;
        }

        None
    }

    /// Close a position and realize its P&L into cash
    ///
    /// Returns `None` if no position exists for `symbol`.
    pub fn close_position(&mut self, symbol: &str) -> Option<Decimal> {
        let position = self.positions.remove(symbol)?;
        let pnl = position.unrealized_pnl();
        self.current_capital += pnl;

        tracing::info!(symbol, realized_pnl = %pnl, "Closed position");
        Some(pnl)
    }

    /// Current portfolio snapshot
    pub fn portfolio_status(&self) -> PortfolioStatus {
        let positions_value: Decimal = self.positions.values().map(Position::position_value).sum();
        let total_value = self.current_capital + positions_value;

        PortfolioStatus {
            total_value,
            cash: self.current_capital,
            positions_value,
            position_count: self.positions.len(),
            portfolio_return_pct: (total_value - self.initial_capital) / self.initial_capital
                * dec!(100),
        }
    }

    /// Look up an open position
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Number of open positions
    pub fn open_position_count(&self) -> usize {
        self.positions.len()
    }

    /// Cash balance
    pub fn current_capital(&self) -> Decimal {
        self.current_capital
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RiskConfig {
        RiskConfig {
            max_position_size_pct: dec!(0.02),
            max_portfolio_risk_pct: dec!(0.05),
            max_positions: 5,
            stop_loss_pct: dec!(0.02),
        }
    }

    fn manager() -> RiskManager {
        RiskManager::new(dec!(100000), limits())
    }

    #[test]
    fn test_position_size_scenario() {
        // floor(100000 * 0.02 / 150) = 13
        let risk = manager();
        assert_eq!(risk.calculate_position_size(dec!(150)), 13);
    }

    #[test]
    fn test_position_size_zero_price() {
        let risk = manager();
        assert_eq!(risk.calculate_position_size(Decimal::ZERO), 0);
        assert_eq!(risk.calculate_position_size(dec!(-5)), 0);
    }

    #[test]
    fn test_position_size_price_above_budget() {
        // Budget is 2000; a 5000 share rounds to zero
        let risk = manager();
        assert_eq!(risk.calculate_position_size(dec!(5000)), 0);
    }

    #[test]
    fn test_open_position_sets_stop() {
        let mut risk = manager();
        let position = risk.open_position("AAPL", dec!(100)).unwrap();

        assert_eq!(position.quantity, 20);
        assert_eq!(position.entry_price, dec!(100));
        assert_eq!(position.stop_loss_price, dec!(98));
        assert_eq!(risk.open_position_count(), 1);
    }

    #[test]
    fn test_open_does_not_debit_cash() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();
        assert_eq!(risk.current_capital(), dec!(100000));
    }

    #[test]
    fn test_at_most_one_position_per_symbol() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();

        assert_eq!(
            risk.can_open_position("AAPL", dec!(100)),
            Err(OpenRefusal::AlreadyOpen("AAPL".to_string()))
        );
        assert!(risk.open_position("AAPL", dec!(100)).is_none());
        assert_eq!(risk.open_position_count(), 1);
    }

    #[test]
    fn test_max_positions_refusal() {
        let mut risk = RiskManager::new(
            dec!(1000000),
            RiskConfig {
                max_position_size_pct: dec!(0.02),
                max_portfolio_risk_pct: dec!(0.50),
                max_positions: 5,
                stop_loss_pct: dec!(0.02),
            },
        );

        for symbol in ["A", "B", "C", "D", "E"] {
            assert!(risk.open_position(symbol, dec!(100)).is_some());
        }

        // Refused regardless of price
        for price in [dec!(1), dec!(100), dec!(99999)] {
            assert_eq!(
                risk.can_open_position("F", price),
                Err(OpenRefusal::MaxPositionsReached)
            );
        }
    }

    #[test]
    fn test_degenerate_price_refusal() {
        let risk = manager();
        assert_eq!(
            risk.can_open_position("AAPL", Decimal::ZERO),
            Err(OpenRefusal::ZeroQuantity)
        );
        assert_eq!(
            risk.can_open_position("AAPL", dec!(5000)),
            Err(OpenRefusal::ZeroQuantity)
        );
    }

    #[test]
    fn test_portfolio_risk_cap_enforced_after_open() {
        // 2% per position, 5% aggregate: the third entry must be refused
        let mut risk = manager();
        assert!(risk.open_position("A", dec!(100)).is_some());
        assert!(risk.open_position("B", dec!(100)).is_some());

        assert_eq!(
            risk.can_open_position("C", dec!(100)),
            Err(OpenRefusal::PortfolioRiskExceeded)
        );
        assert!(risk.open_position("C", dec!(100)).is_none());

        // Invariant: open exposure never exceeds the aggregate cap
        let status = risk.portfolio_status();
        assert!(status.positions_value <= risk.current_capital() * dec!(0.05));
    }

    #[test]
    fn test_update_position_marks_price() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();

        let result = risk.update_position("AAPL", dec!(105));
        assert!(result.is_none());
        assert_eq!(risk.position("AAPL").unwrap().current_price, dec!(105));
    }

    #[test]
    fn test_update_unknown_symbol_is_noop() {
        let mut risk = manager();
        assert!(risk.update_position("MSFT", dec!(100)).is_none());
    }

    #[test]
    fn test_stop_loss_scenario() {
        // Entry 100, stop_loss_pct 0.02 -> stop 98.0; update at 97.5
        // force-closes with P&L computed at 97.5
        let mut risk = manager();
        let position = risk.open_position("AAPL", dec!(100)).unwrap();
        assert_eq!(position.stop_loss_price, dec!(98.00));

        let pnl = risk.update_position("AAPL", dec!(97.5)).unwrap();
        assert_eq!(pnl, dec!(-50)); // 20 * (97.5 - 100)
        assert_eq!(risk.open_position_count(), 0);
        assert_eq!(risk.current_capital(), dec!(99950));
    }

    #[test]
    fn test_stop_triggers_exactly_at_stop_price() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();

        let pnl = risk.update_position("AAPL", dec!(98)).unwrap();
        assert_eq!(pnl, dec!(-40));
    }

    #[test]
    fn test_close_position_credits_capital() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();
        risk.update_position("AAPL", dec!(110));

        let pnl = risk.close_position("AAPL").unwrap();
        assert_eq!(pnl, dec!(200)); // 20 * 10
        assert_eq!(risk.current_capital(), dec!(100200));
        assert!(risk.position("AAPL").is_none());
    }

    #[test]
    fn test_close_unknown_symbol() {
        let mut risk = manager();
        assert!(risk.close_position("AAPL").is_none());
    }

    #[test]
    fn test_close_then_reopen_same_price_no_double_counting() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();

        let pnl = risk.close_position("AAPL").unwrap();
        assert_eq!(pnl, Decimal::ZERO); // closed at entry, flat P&L
        assert_eq!(risk.current_capital(), dec!(100000));

        let reopened = risk.open_position("AAPL", dec!(100)).unwrap();
        assert_eq!(reopened.quantity, 20);
        assert_eq!(risk.current_capital(), dec!(100000));
    }

    #[test]
    fn test_portfolio_status() {
        let mut risk = manager();
        risk.open_position("AAPL", dec!(100)).unwrap();
        risk.update_position("AAPL", dec!(110));

        let status = risk.portfolio_status();
        assert_eq!(status.cash, dec!(100000));
        assert_eq!(status.positions_value, dec!(2200));
        assert_eq!(status.total_value, dec!(102200));
        assert_eq!(status.position_count, 1);
        assert_eq!(status.portfolio_return_pct, dec!(2.2));
    }

    #[test]
    fn test_portfolio_status_empty() {
        let status = manager().portfolio_status();
        assert_eq!(status.total_value, dec!(100000));
        assert_eq!(status.positions_value, Decimal::ZERO);
        assert_eq!(status.portfolio_return_pct, Decimal::ZERO);
        assert_eq!(status.position_count, 0);
    }
}
