//! RSI (Relative Strength Index) with exponentially smoothed averages.
//!
//! - delta[i] = C[i] - C[i-1]; bar 0 has no delta and counts as no gain, no loss
//! - gain = max(delta, 0), loss = max(-delta, 0)
//! - avg_gain / avg_loss: adjusted EWMA with span = n
//! - RS = avg_gain / max(avg_loss, 1e-10)
//! - RSI = 100 - 100 / (1 + RS)
//!
//! Values are computed from bar 0, but the first n bars are flagged invalid.

use crate::domain::indicator::ema::ewm_mean;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

/// Floor applied to the average loss before dividing.
pub const MIN_AVG_LOSS: f64 = 1e-10;

/// Intermediate and final RSI columns, one entry per close.
#[derive(Debug, Clone, PartialEq)]
pub struct RsiComponents {
    pub avg_gain: Vec<f64>,
    pub avg_loss: Vec<f64>,
    pub rsi: Vec<f64>,
}

pub fn rsi_components(closes: &[f64], period: usize) -> RsiComponents {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let delta = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let avg_gain = ewm_mean(&gains, period);
    let avg_loss = ewm_mean(&losses, period);

    let rsi = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            let rs = g / l.max(MIN_AVG_LOSS);
            100.0 - 100.0 / (1.0 + rs)
        })
        .collect();

    RsiComponents {
        avg_gain,
        avg_loss,
        rsi,
    }
}

impl RsiComponents {
    /// Dates the RSI column against `bars`. Points before bar `period` are
    /// marked invalid but keep their computed value.
    pub fn to_series(&self, bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
        let values = bars
            .iter()
            .zip(&self.rsi)
            .enumerate()
            .map(|(i, (bar, &rsi))| IndicatorPoint {
                date: bar.date,
                valid: period > 0 && i >= period,
                value: rsi,
            })
            .collect();

        IndicatorSeries {
            indicator_type: IndicatorType::Rsi(period),
            values,
        }
    }
}
