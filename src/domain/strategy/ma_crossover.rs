//! Moving-average crossover.
//!
//! Long while SMA(short) > SMA(long), short while SMA(short) < SMA(long),
//! flat when equal. A window that has not filled yet counts as 0.0, so the
//! early bars compare 0 against 0 (or a real mean against 0 once only the
//! shorter window has filled).

use std::cmp::Ordering;

use crate::domain::error::SigtraderError;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::series::PriceSeries;
use crate::domain::signal::Signal;

use super::{SignalFrame, SignalStrategy};

pub const STRATEGY_TYPE: &str = "ma_crossover";
pub const DEFAULT_SHORT_WINDOW: usize = 50;
pub const DEFAULT_LONG_WINDOW: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingAverageCrossover {
    short_window: usize,
    long_window: usize,
}

impl MovingAverageCrossover {
    /// Both windows must be positive. `short_window >= long_window` is
    /// accepted and simply runs.
    pub fn new(short_window: usize, long_window: usize) -> Result<Self, SigtraderError> {
        if short_window == 0 {
            return Err(SigtraderError::invalid_parameter(
                STRATEGY_TYPE,
                "short_window",
                "must be positive",
            ));
        }
        if long_window == 0 {
            return Err(SigtraderError::invalid_parameter(
                STRATEGY_TYPE,
                "long_window",
                "must be positive",
            ));
        }
        Ok(MovingAverageCrossover {
            short_window,
            long_window,
        })
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }
}

impl Default for MovingAverageCrossover {
    fn default() -> Self {
        MovingAverageCrossover {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
        }
    }
}

impl SignalStrategy for MovingAverageCrossover {
    fn name(&self) -> &str {
        "Moving Average Crossover"
    }

    /// Bars before the shorter window fills. After that its mean is compared
    /// against the unfilled longer window (0.0) and the signal can move.
    fn warmup_bars(&self) -> usize {
        self.short_window.min(self.long_window) - 1
    }

    fn generate_signals<'a>(&self, series: &'a PriceSeries) -> SignalFrame<'a> {
        let short_ma = calculate_sma(series.bars(), self.short_window).raw_values();
        let long_ma = calculate_sma(series.bars(), self.long_window).raw_values();

        let signals = short_ma
            .iter()
            .zip(&long_ma)
            .map(|(s, l)| Signal::from_ordering(s.partial_cmp(l).unwrap_or(Ordering::Equal)))
            .collect();

        SignalFrame::new(series, signals)
            .with_column("short_ma", short_ma)
            .with_column("long_ma", long_ma)
    }
}
