//! Signal generation module
//!
//! Derives discrete Long/Short signals and crossover transitions from a
//! price series using a dual simple-moving-average comparison.

mod crossover;
mod types;

pub use crossover::CrossoverStrategy;
pub use types::{Signal, SignalBar, Transition};
