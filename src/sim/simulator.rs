//! Simulation orchestrator

use super::{TradeAction, TradeLogEntry};
use crate::data::PriceProvider;
use crate::risk::{PortfolioStatus, RiskManager};
use crate::signal::{CrossoverStrategy, SignalBar, Transition};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Drives the signal engine and risk manager over historical series
///
/// Symbols are processed independently and sequentially against a shared
/// capital pool, so entries across symbols compete for the same aggregate
/// risk budget. The orchestrator is the only component that writes the
/// trade log.
pub struct Simulator<P: PriceProvider> {
    provider: P,
    strategy: CrossoverStrategy,
    risk: RiskManager,
    symbols: Vec<String>,
    trade_log: Vec<TradeLogEntry>,
}

impl<P: PriceProvider> Simulator<P> {
    /// Create a simulator over the given symbols
    pub fn new(
        provider: P,
        strategy: CrossoverStrategy,
        risk: RiskManager,
        symbols: Vec<String>,
    ) -> Self {
        Self {
            provider,
            strategy,
            risk,
            symbols,
            trade_log: Vec::new(),
        }
    }

    /// Run the simulation over all configured symbols
    pub async fn run(&mut self, period: &str, interval: &str) -> anyhow::Result<()> {
        tracing::info!(symbols = ?self.symbols, period, interval, "Starting simulation");

        for symbol in self.symbols.clone() {
            let bars = self.provider.fetch(&symbol, period, interval).await?;
            tracing::debug!(symbol = %symbol, bars = bars.len(), "Fetched price series");

            let annotated = self.strategy.calculate_signals(&bars);
            self.walk_series(&symbol, &annotated);
        }

        tracing::info!(trades = self.trade_log.len(), "Simulation finished");
        Ok(())
    }

    /// Walk one annotated series in timestamp order
    ///
    /// Transition handling runs before the price update, so an exit
    /// realizes P&L at the last marked price and the stop is checked on
    /// every bar regardless of transitions.
    fn walk_series(&mut self, symbol: &str, series: &[SignalBar]) {
        for row in series {
            let price = row.bar.close;

            match row.transition {
                Some(Transition::Bullish) => {
                    if let Some(position) = self.risk.open_position(symbol, price) {
                        self.log_trade(
                            row.bar.timestamp,
                            symbol,
                            TradeAction::Buy,
                            price,
                            position.quantity,
                            None,
                        );
                    }
                }
                Some(Transition::Bearish) => {
                    let quantity = self.held_quantity(symbol);
                    if let Some(pnl) = self.risk.close_position(symbol) {
                        self.log_trade(
                            row.bar.timestamp,
                            symbol,
                            TradeAction::Sell,
                            price,
                            quantity,
                            Some(pnl),
                        );
                    }
                }
                None => {}
            }

            // Stop-losses are checked on every bar, not just signal bars
            let quantity = self.held_quantity(symbol);
            if let Some(pnl) = self.risk.update_position(symbol, price) {
                self.log_trade(
                    row.bar.timestamp,
                    symbol,
                    TradeAction::Sell,
                    price,
                    quantity,
                    Some(pnl),
                );
            }
        }
    }

    fn held_quantity(&self, symbol: &str) -> u64 {
        self.risk.position(symbol).map_or(0, |p| p.quantity)
    }

    fn log_trade(
        &mut self,
        timestamp: DateTime<Utc>,
        symbol: &str,
        action: TradeAction,
        price: Decimal,
        quantity: u64,
        realized_pnl: Option<Decimal>,
    ) {
        let entry = TradeLogEntry {
            id: Uuid::new_v4(),
            timestamp,
            symbol: symbol.to_string(),
            action,
            price,
            quantity,
            realized_pnl,
            portfolio_value: self.risk.portfolio_status().total_value,
        };

        tracing::info!(
            symbol,
            action = ?entry.action,
            %price,
            quantity,
            pnl = ?realized_pnl,
            portfolio_value = %entry.portfolio_value,
            "Trade executed"
        );

        self.trade_log.push(entry);
    }

    /// The append-only trade log, in execution order
    pub fn trade_log(&self) -> &[TradeLogEntry] {
        &self.trade_log
    }

    /// Current portfolio snapshot from the risk manager
    pub fn portfolio_status(&self) -> PortfolioStatus {
        self.risk.portfolio_status()
    }
}
