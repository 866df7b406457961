//! Risk management module
//!
//! Capital accounting, position book, entry gating against size/exposure
//! limits, and stop-loss enforcement.

mod manager;
mod position;
mod types;

pub use manager::{PortfolioStatus, RiskManager};
pub use position::Position;
pub use types::OpenRefusal;
