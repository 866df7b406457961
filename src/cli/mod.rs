//! CLI interface for sma-trader
//!
//! Provides subcommands for:
//! - `run`: Run the paper-trading simulation and print the report
//! - `config`: Show the effective configuration

mod run;

pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sma-trader")]
#[command(about = "Paper-trading simulator with SMA crossover signals and risk management")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the paper-trading simulation
    Run(RunArgs),
    /// Show the effective configuration
    Config,
}
