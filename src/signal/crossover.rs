//! Dual moving-average crossover strategy

use super::{Signal, SignalBar, Transition};
use crate::data::PriceBar;
use rust_decimal::Decimal;

/// Generates signals from the relative order of two SMAs over `close`
///
/// The short window is expected to be smaller than the long window; the
/// first `max(short, long) - 1` bars carry no signal because one of the
/// averages is not yet fully populated.
#[derive(Debug, Clone)]
pub struct CrossoverStrategy {
    short_window: usize,
    long_window: usize,
}

impl CrossoverStrategy {
    /// Create a strategy with the given window lengths
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
        }
    }

    /// Annotate a price series with SMAs, signals, and transitions
    ///
    /// A transition fires only between two consecutive bars that both
    /// carry a defined signal; the first defined bar never fires.
    pub fn calculate_signals(&self, bars: &[PriceBar]) -> Vec<SignalBar> {
        let mut short = RollingMean::new(self.short_window);
        let mut long = RollingMean::new(self.long_window);
        let mut previous: Option<Signal> = None;
        let mut out = Vec::with_capacity(bars.len());

        for bar in bars {
            let sma_short = short.push(bar.close);
            let sma_long = long.push(bar.close);

            let signal = match (sma_short, sma_long) {
                (Some(s), Some(l)) => Some(if s > l { Signal::Long } else { Signal::Short }),
                _ => None,
            };

            let transition = match (previous, signal) {
                (Some(prev), Some(cur)) if prev != cur => Some(match cur {
                    Signal::Long => Transition::Bullish,
                    Signal::Short => Transition::Bearish,
                }),
                _ => None,
            };

            previous = signal;
            out.push(SignalBar {
                bar: bar.clone(),
                sma_short,
                sma_long,
                signal,
                transition,
            });
        }

        out
    }
}

/// Trailing-window arithmetic mean over a Decimal stream
struct RollingMean {
    window: usize,
    values: std::collections::VecDeque<Decimal>,
    sum: Decimal,
}

impl RollingMean {
    fn new(window: usize) -> Self {
        Self {
            window,
            values: std::collections::VecDeque::with_capacity(window + 1),
            sum: Decimal::ZERO,
        }
    }

    /// Push a value; returns the mean once the window is full
    fn push(&mut self, value: Decimal) -> Option<Decimal> {
        if self.window == 0 {
            return None;
        }
        self.values.push_back(value);
        self.sum += value;
        if self.values.len() > self.window {
            if let Some(oldest) = self.values.pop_front() {
                self.sum -= oldest;
            }
        }
        if self.values.len() == self.window {
            Some(self.sum / Decimal::from(self.window as u64))
        } else {
            None
        }
    }
}
