//! Configuration types for sma-trader

use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub trading: TradingConfig,
    pub strategy: StrategyConfig,
    pub risk: RiskConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Symbols and starting capital
#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    pub symbols: Vec<String>,
    pub initial_capital: Decimal,
}

/// Moving-average window lengths
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Short SMA window in bars; must be below `long_window`
    pub short_window: usize,
    /// Long SMA window in bars
    pub long_window: usize,
}

/// Risk limits applied to every entry
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Fraction of current capital sizeable into one new position
    pub max_position_size_pct: Decimal,
    /// Fraction of current capital the sum of open position values may reach
    pub max_portfolio_risk_pct: Decimal,
    /// Maximum concurrent open positions
    pub max_positions: usize,
    /// Fractional distance below entry that triggers an automatic exit
    pub stop_loss_pct: Decimal,
}

/// Historical data range settings
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Range to simulate (provider notation, e.g. "1d", "1mo", "1y")
    #[serde(default = "default_period")]
    pub period: String,
    /// Bar interval (e.g. "1m", "5m", "1d")
    #[serde(default = "default_interval")]
    pub interval: String,
}

fn default_period() -> String {
    "1d".to_string()
}
fn default_interval() -> String {
    "5m".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            interval: default_interval(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints the core relies on
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.strategy.short_window == 0 || self.strategy.long_window == 0 {
            anyhow::bail!("strategy windows must be positive");
        }
        if self.strategy.short_window >= self.strategy.long_window {
            anyhow::bail!(
                "short_window ({}) must be below long_window ({})",
                self.strategy.short_window,
                self.strategy.long_window
            );
        }
        if self.trading.symbols.is_empty() {
            anyhow::bail!("at least one trading symbol is required");
        }
        Ok(())
    }
}
