//! Performance metrics over a strategy return series.
//!
//! `total_return` is the return of the final bar, not the compounded return
//! of the run (equity[-1] / initial_capital - 1). Reports and callers that
//! want the compounded figure take it from the equity curve.

use serde::Serialize;

use super::portfolio::ReturnPoint;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub sharpe_ratio: f64,
    pub total_return: f64,
}

impl Metrics {
    /// Recomputed from scratch on every call.
    pub fn summarize(returns: &[ReturnPoint]) -> Self {
        let values: Vec<f64> = returns.iter().map(|p| p.value).collect();
        Metrics {
            sharpe_ratio: sharpe_ratio(&values),
            total_return: values.last().copied().unwrap_or(0.0),
        }
    }
}

/// mean / population stddev * sqrt(252); 0.0 for fewer than two values or
/// zero variance.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    // constant series: the computed stddev would only be rounding noise
    if returns.iter().all(|&r| r == returns[0]) {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 && stddev.is_finite() {
        mean / stddev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}
