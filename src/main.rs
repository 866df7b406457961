use clap::Parser;
use sma_trader::cli::{Cli, Commands};
use sma_trader::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    sma_trader::telemetry::init_logging(&config.telemetry.log_level)?;

    match cli.command {
        Commands::Run(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Symbols: {}", config.trading.symbols.join(", "));
            println!("  Initial capital: {}", config.trading.initial_capital);
            println!(
                "  Strategy: SMA {}/{}",
                config.strategy.short_window, config.strategy.long_window
            );
            println!(
                "  Risk: pos={}% portfolio={}% max_positions={} stop={}%",
                config.risk.max_position_size_pct * rust_decimal_macros::dec!(100),
                config.risk.max_portfolio_risk_pct * rust_decimal_macros::dec!(100),
                config.risk.max_positions,
                config.risk.stop_loss_pct * rust_decimal_macros::dec!(100),
            );
            println!(
                "  Data: period={} interval={}",
                config.data.period, config.data.interval
            );
        }
    }

    Ok(())
}
