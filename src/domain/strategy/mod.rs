//! Signal strategies: turn a price series into one directional signal per bar.
//!
//! Strategies are pure. They read the series, never hold state between calls,
//! and return a `SignalFrame` that borrows the input alongside the signal
//! column and any intermediate indicator columns.

pub mod factory;
pub mod ma_crossover;
pub mod rsi_threshold;

pub use factory::{create_strategy, StrategyConfig};
pub use ma_crossover::MovingAverageCrossover;
pub use rsi_threshold::RsiThresholdCross;

use std::fmt;

use super::series::PriceSeries;
use super::signal::Signal;

/// A price series augmented with a signal column.
#[derive(Debug, Clone)]
pub struct SignalFrame<'a> {
    pub series: &'a PriceSeries,
    pub signals: Vec<Signal>,
    /// Named intermediate columns (e.g. `short_ma`, `rsi`), one value per bar.
    pub columns: Vec<(String, Vec<f64>)>,
}

impl<'a> SignalFrame<'a> {
    pub fn new(series: &'a PriceSeries, signals: Vec<Signal>) -> Self {
        SignalFrame {
            series,
            signals,
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.push((name.into(), values));
        self
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// (long, short, flat) signal counts.
    pub fn signal_counts(&self) -> (usize, usize, usize) {
        self.signals
            .iter()
            .fold((0, 0, 0), |(long, short, flat), s| match s {
                Signal::Long => (long + 1, short, flat),
                Signal::Short => (long, short + 1, flat),
                Signal::Flat => (long, short, flat + 1),
            })
    }
}

/// A strategy producing a signal in {-1, 0, +1} for every bar.
pub trait SignalStrategy: Send + Sync + fmt::Debug {
    /// Human-readable name (e.g. "Moving Average Crossover").
    fn name(&self) -> &str;

    /// Number of leading bars whose signal is fixed at Flat for lack of history.
    fn warmup_bars(&self) -> usize;

    /// Produce the signal column for `series`. Deterministic; the series is
    /// only read.
    fn generate_signals<'a>(&self, series: &'a PriceSeries) -> SignalFrame<'a>;
}
