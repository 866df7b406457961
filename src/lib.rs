//! sma-trader: Paper-trading simulator driven by SMA crossover signals
//!
//! This library provides the core components for:
//! - Historical price retrieval from Yahoo Finance
//! - Dual moving-average crossover signal generation
//! - Risk-managed position sizing, exposure limits, and stop-losses
//! - Sequential bar-by-bar paper-trade simulation with an append-only trade log
//! - Performance analytics over the finished trade log

pub mod analytics;
pub mod cli;
pub mod config;
pub mod data;
pub mod risk;
pub mod signal;
pub mod sim;
pub mod telemetry;
