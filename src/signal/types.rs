//! Signal types

use crate::data::PriceBar;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discrete trading signal for one bar
///
/// `Long` requires the short SMA to be strictly above the long SMA; an
/// exact tie resolves to `Short`. Warm-up bars where either average is
/// not yet populated carry no signal at all (`None` in [`SignalBar`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Short SMA strictly above long SMA
    Long,
    /// Short SMA at or below long SMA
    Short,
}

/// A bar-to-bar change in signal; the only trigger for trade actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Signal changed into Long: entry request
    Bullish,
    /// Signal changed out of Long: exit request
    Bearish,
}

/// One row of the annotated series produced by the strategy
#[derive(Debug, Clone)]
pub struct SignalBar {
    /// The underlying price bar
    pub bar: PriceBar,
    /// Short-window SMA, once the window is populated
    pub sma_short: Option<Decimal>,
    /// Long-window SMA, once the window is populated
    pub sma_long: Option<Decimal>,
    /// Signal for this bar; `None` during warm-up
    pub signal: Option<Signal>,
    /// Crossover event, set only when this bar and the previous bar both
    /// carry a defined signal and they differ
    pub transition: Option<Transition>,
}
