//! Run command implementation

use crate::analytics::PerformanceAnalyzer;
use crate::config::Config;
use crate::data::YahooClient;
use crate::risk::RiskManager;
use crate::signal::CrossoverStrategy;
use crate::sim::Simulator;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Symbols to trade, overriding the configured list
    #[arg(long, num_args = 1..)]
    pub symbols: Option<Vec<String>>,

    /// Range to simulate (e.g. 1d, 5d, 1mo), overriding the config
    #[arg(long)]
    pub period: Option<String>,

    /// Bar interval (e.g. 1m, 5m, 1d), overriding the config
    #[arg(long)]
    pub interval: Option<String>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let symbols = self
            .symbols
            .clone()
            .unwrap_or_else(|| config.trading.symbols.clone());
        let period = self.period.as_deref().unwrap_or(&config.data.period);
        let interval = self.interval.as_deref().unwrap_or(&config.data.interval);

        tracing::info!(?symbols, period, interval, "Starting paper trading simulation");

        let strategy =
            CrossoverStrategy::new(config.strategy.short_window, config.strategy.long_window);
        let risk = RiskManager::new(config.trading.initial_capital, config.risk.clone());

        let mut simulator = Simulator::new(YahooClient::new(), strategy, risk, symbols);
        simulator.run(period, interval).await?;

        let report = PerformanceAnalyzer::new(simulator.trade_log(), config.trading.initial_capital)
            .calculate_metrics();
        println!("{}", report.format_table());

        let status = simulator.portfolio_status();
        println!(
            "Final portfolio: total={} cash={} positions={} ({} open)",
            status.total_value, status.cash, status.positions_value, status.position_count
        );

        Ok(())
    }
}
