//! Performance analytics over a finished trade log
//!
//! Aggregate statistics only: the trade log is the single input, and the
//! output is a fixed-field report plus a CLI table rendering.

use crate::sim::TradeLogEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Annualization factor for the Sharpe ratio (daily bars)
const TRADING_DAYS_PER_YEAR: f64 = 252.0;
/// Assumed annual risk-free rate
const RISK_FREE_RATE: f64 = 0.01;

/// Summary statistics computed from the trade log
#[derive(Debug, Clone, Default)]
pub struct PerformanceReport {
    /// Return over initial capital, percent
    pub total_return_pct: Decimal,
    /// Share of closed trades with positive realized P&L, percent
    pub win_rate_pct: Decimal,
    /// Mean realized P&L per closed trade
    pub avg_profit_per_trade: Decimal,
    /// Worst peak-to-trough drop of the portfolio value, percent (<= 0)
    pub max_drawdown_pct: Decimal,
    /// Annualized Sharpe ratio of snapshot-to-snapshot returns
    pub sharpe_ratio: f64,
    /// All log entries (buys and sells)
    pub total_trades: usize,
    /// Sell entries, i.e. trades with realized P&L
    pub closed_trades: usize,
}

/// Computes performance metrics from a trade log
pub struct PerformanceAnalyzer<'a> {
    trade_log: &'a [TradeLogEntry],
    initial_capital: Decimal,
}

impl<'a> PerformanceAnalyzer<'a> {
    /// Create an analyzer over a finished trade log
    pub fn new(trade_log: &'a [TradeLogEntry], initial_capital: Decimal) -> Self {
        Self {
            trade_log,
            initial_capital,
        }
    }

    /// Compute all metrics; zeroed report for an empty log
    pub fn calculate_metrics(&self) -> PerformanceReport {
        if self.trade_log.is_empty() {
            return PerformanceReport::default();
        }

        let values: Vec<Decimal> = self.trade_log.iter().map(|t| t.portfolio_value).collect();
        let final_value = values[values.len() - 1];

        let realized: Vec<Decimal> = self
            .trade_log
            .iter()
            .filter_map(|t| t.realized_pnl)
            .collect();
        let winning = realized.iter().filter(|p| **p > Decimal::ZERO).count();
        let closed_trades = realized.len();

        let win_rate_pct = if closed_trades > 0 {
            Decimal::from(winning as u64) / Decimal::from(closed_trades as u64) * dec!(100)
        } else {
            Decimal::ZERO
        };

        let avg_profit_per_trade = if closed_trades > 0 {
            realized.iter().sum::<Decimal>() / Decimal::from(closed_trades as u64)
        } else {
            Decimal::ZERO
        };

        PerformanceReport {
            total_return_pct: (final_value - self.initial_capital) / self.initial_capital
                * dec!(100),
            win_rate_pct,
            avg_profit_per_trade,
            max_drawdown_pct: max_drawdown_pct(&values),
            sharpe_ratio: sharpe_ratio(&values),
            total_trades: self.trade_log.len(),
            closed_trades,
        }
    }
}

/// Worst peak-to-trough drawdown over a value series, in percent
fn max_drawdown_pct(values: &[Decimal]) -> Decimal {
    let mut peak = Decimal::MIN;
    let mut worst = Decimal::ZERO;

    for value in values {
        if *value > peak {
            peak = *value;
        }
        if peak > Decimal::ZERO {
            let drawdown = (*value - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }

    worst * dec!(100)
}

/// Annualized Sharpe ratio of snapshot-to-snapshot returns
fn sharpe_ratio(values: &[Decimal]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let values: Vec<f64> = values.iter().map(|v| v.to_f64().unwrap_or(0.0)).collect();
    let excess: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0] - RISK_FREE_RATE / TRADING_DAYS_PER_YEAR)
        .collect();

    if excess.is_empty() {
        return 0.0;
    }

    let mean = excess.iter().sum::<f64>() / excess.len() as f64;
    let variance = excess.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / excess.len() as f64;
    let std = variance.sqrt();

    if std == 0.0 {
        return 0.0;
    }

    TRADING_DAYS_PER_YEAR.sqrt() * mean / std
}

impl PerformanceReport {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        format!(
            r#"
══════════════════════════════════════════════════════
               SIMULATION RESULTS
══════════════════════════════════════════════════════

PERFORMANCE
───────────────────────────────────────────────────────
Total Return:     {:+.2}%
Win Rate:         {:.1}%
Avg Profit/Trade: {:+.2}
Max Drawdown:     {:.2}%
Sharpe Ratio:     {:.2}

ACTIVITY
───────────────────────────────────────────────────────
Total Trades:     {}
Closed Trades:    {}
══════════════════════════════════════════════════════
"#,
            self.total_return_pct,
            self.win_rate_pct,
            self.avg_profit_per_trade,
            self.max_drawdown_pct,
            self.sharpe_ratio,
            self.total_trades,
            self.closed_trades,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TradeAction;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn entry(
        minutes: i64,
        action: TradeAction,
        pnl: Option<Decimal>,
        portfolio_value: Decimal,
    ) -> TradeLogEntry {
        TradeLogEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now() + Duration::minutes(minutes),
            symbol: "AAPL".to_string(),
            action,
            price: dec!(100),
            quantity: 10,
            realized_pnl: pnl,
            portfolio_value,
        }
    }

    #[test]
    fn test_empty_log_zeroed_report() {
        let analyzer = PerformanceAnalyzer::new(&[], dec!(100000));
        let report = analyzer.calculate_metrics();

        assert_eq!(report.total_return_pct, Decimal::ZERO);
        assert_eq!(report.total_trades, 0);
        assert_eq!(report.sharpe_ratio, 0.0);
    }

    #[test]
    fn test_total_return_and_trade_counts() {
        let log = vec![
            entry(0, TradeAction::Buy, None, dec!(101000)),
            entry(1, TradeAction::Sell, Some(dec!(500)), dec!(100500)),
            entry(2, TradeAction::Buy, None, dec!(101500)),
            entry(3, TradeAction::Sell, Some(dec!(-200)), dec!(100300)),
        ];
        let analyzer = PerformanceAnalyzer::new(&log, dec!(100000));
        let report = analyzer.calculate_metrics();

        assert_eq!(report.total_return_pct, dec!(0.3));
        assert_eq!(report.total_trades, 4);
        assert_eq!(report.closed_trades, 2);
        assert_eq!(report.win_rate_pct, dec!(50));
        assert_eq!(report.avg_profit_per_trade, dec!(150));
    }

    #[test]
    fn test_max_drawdown() {
        // Peak 110000, trough 99000: drawdown = -10%
        let values = vec![dec!(100000), dec!(110000), dec!(99000), dec!(105000)];
        assert_eq!(max_drawdown_pct(&values), dec!(-10));
    }

    #[test]
    fn test_max_drawdown_monotonic_rise() {
        let values = vec![dec!(100), dec!(110), dec!(120)];
        assert_eq!(max_drawdown_pct(&values), Decimal::ZERO);
    }

    #[test]
    fn test_sharpe_zero_for_flat_series() {
        let values = vec![dec!(100000), dec!(100000), dec!(100000)];
        assert_eq!(sharpe_ratio(&values), 0.0);
    }

    #[test]
    fn test_sharpe_positive_for_steady_gains() {
        let values: Vec<Decimal> = (0..10).map(|i| dec!(100000) + Decimal::from(i * 500)).collect();
        assert!(sharpe_ratio(&values) > 0.0);
    }

    #[test]
    fn test_format_table_contains_metrics() {
        let log = vec![
            entry(0, TradeAction::Buy, None, dec!(101000)),
            entry(1, TradeAction::Sell, Some(dec!(500)), dec!(100500)),
        ];
        let report = PerformanceAnalyzer::new(&log, dec!(100000)).calculate_metrics();
        let table = report.format_table();

        assert!(table.contains("SIMULATION RESULTS"));
        assert!(table.contains("Win Rate"));
        assert!(table.contains("Sharpe Ratio"));
    }
}
