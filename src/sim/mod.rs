//! Paper-trading simulation module
//!
//! Replays historical bars per symbol in time order, drives the risk
//! manager from signal transitions, and appends every executed trade to
//! an append-only log.

mod simulator;
mod trade_log;

pub use simulator::Simulator;
pub use trade_log::{TradeAction, TradeLogEntry};
