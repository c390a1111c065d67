//! RSI threshold cross.
//!
//! Long on the bar where RSI crosses down through `oversold`, short on the
//! bar where it crosses up through `overbought`, flat otherwise. The first
//! `period` bars are always flat. The exponential averages behind RSI are
//! defined from bar 0, so the warmup is cut where the indicator starts
//! flagging points valid, not where its value first becomes non-zero.

use crate::domain::error::SigtraderError;
use crate::domain::indicator::rsi::rsi_components;
use crate::domain::series::PriceSeries;
use crate::domain::signal::Signal;

use super::{SignalFrame, SignalStrategy};

pub const STRATEGY_TYPE: &str = "rsi";
pub const DEFAULT_PERIOD: usize = 14;
pub const DEFAULT_OVERBOUGHT: f64 = 80.0;
pub const DEFAULT_OVERSOLD: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RsiThresholdCross {
    period: usize,
    overbought: f64,
    oversold: f64,
}

impl RsiThresholdCross {
    pub fn new(period: usize, overbought: f64, oversold: f64) -> Result<Self, SigtraderError> {
        if period == 0 {
            return Err(SigtraderError::invalid_parameter(
                STRATEGY_TYPE,
                "period",
                "must be positive",
            ));
        }
        if !overbought.is_finite() {
            return Err(SigtraderError::invalid_parameter(
                STRATEGY_TYPE,
                "overbought",
                "must be finite",
            ));
        }
        if !oversold.is_finite() {
            return Err(SigtraderError::invalid_parameter(
                STRATEGY_TYPE,
                "oversold",
                "must be finite",
            ));
        }
        if oversold >= overbought {
            return Err(SigtraderError::invalid_parameter(
                STRATEGY_TYPE,
                "oversold",
                format!("oversold ({oversold}) must be less than overbought ({overbought})"),
            ));
        }
        Ok(RsiThresholdCross {
            period,
            overbought,
            oversold,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn overbought(&self) -> f64 {
        self.overbought
    }

    pub fn oversold(&self) -> f64 {
        self.oversold
    }

    fn cross_signal(&self, prev: f64, curr: f64) -> Signal {
        let long = prev >= self.oversold && curr < self.oversold;
        let short = prev <= self.overbought && curr > self.overbought;
        match (long, short) {
            (true, false) => Signal::Long,
            (false, true) => Signal::Short,
            _ => Signal::Flat,
        }
    }
}

impl Default for RsiThresholdCross {
    fn default() -> Self {
        RsiThresholdCross {
            period: DEFAULT_PERIOD,
            overbought: DEFAULT_OVERBOUGHT,
            oversold: DEFAULT_OVERSOLD,
        }
    }
}

impl SignalStrategy for RsiThresholdCross {
    fn name(&self) -> &str {
        "RSI"
    }

    fn warmup_bars(&self) -> usize {
        self.period
    }

    fn generate_signals<'a>(&self, series: &'a PriceSeries) -> SignalFrame<'a> {
        let components = rsi_components(&series.closes(), self.period);
        let rsi = components.to_series(series.bars(), self.period);

        let mut signals = vec![Signal::Flat; series.len()];
        for i in rsi.warmup_len()..rsi.values.len() {
            signals[i] = self.cross_signal(rsi.values[i - 1].value, rsi.values[i].value);
        }

        SignalFrame::new(series, signals)
            .with_column("avg_gain", components.avg_gain)
            .with_column("avg_loss", components.avg_loss)
            .with_column("rsi", components.rsi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    fn make_series(prices: &[f64]) -> PriceSeries {
        let bars = prices
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                OhlcvBar::from_close(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64),
                    close,
                )
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn rejects_zero_period() {
        let err = RsiThresholdCross::new(0, 80.0, 20.0).unwrap_err();
        assert!(matches!(err, SigtraderError::InvalidParameter { ref param, .. } if param == "period"));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(RsiThresholdCross::new(14, 20.0, 80.0).is_err());
        assert!(RsiThresholdCross::new(14, 50.0, 50.0).is_err());
    }

    #[test]
    fn rejects_non_finite_thresholds() {
        assert!(RsiThresholdCross::new(14, f64::NAN, 20.0).is_err());
        assert!(RsiThresholdCross::new(14, 80.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn defaults() {
        let strat = RsiThresholdCross::default();
        assert_eq!(strat.period(), 14);
        assert_eq!(strat.overbought(), 80.0);
        assert_eq!(strat.oversold(), 20.0);
        assert_eq!(strat.warmup_bars(), 14);
    }

    #[test]
    fn cross_conditions() {
        let strat = RsiThresholdCross::new(2, 70.0, 30.0).unwrap();
        assert_eq!(strat.cross_signal(30.0, 29.9), Signal::Long);
        assert_eq!(strat.cross_signal(29.0, 28.0), Signal::Flat);
        assert_eq!(strat.cross_signal(70.0, 70.1), Signal::Short);
        assert_eq!(strat.cross_signal(71.0, 75.0), Signal::Flat);
        assert_eq!(strat.cross_signal(50.0, 50.0), Signal::Flat);
    }

    #[test]
    fn overbought_cross_after_warmup_goes_short() {
        // choppy start keeps RSI mid-range, then a run of gains pushes it up
        let prices = [100.0, 101.0, 100.0, 101.0, 100.0, 101.0, 105.0, 110.0, 116.0];
        let series = make_series(&prices);
        let frame = RsiThresholdCross::new(3, 70.0, 30.0).unwrap().generate_signals(&series);
        let rsi = frame.column("rsi").unwrap().to_vec();

        let first_short = frame.signals.iter().position(|s| *s == Signal::Short);
        let expected = (3..rsi.len()).find(|&i| rsi[i - 1] <= 70.0 && rsi[i] > 70.0);
        assert!(expected.is_some());
        assert_eq!(first_short, expected);
    }

    #[test]
    fn oversold_cross_after_warmup_goes_long() {
        let prices = [100.0, 99.0, 100.0, 99.0, 100.0, 99.0, 95.0, 90.0, 84.0];
        let series = make_series(&prices);
        let frame = RsiThresholdCross::new(3, 70.0, 30.0).unwrap().generate_signals(&series);

        let first_long = frame.signals.iter().position(|s| *s == Signal::Long);
        assert!(first_long.is_some_and(|i| i >= 3));
        assert!(!frame.signals.contains(&Signal::Short));
    }

    #[test]
    fn warmup_suppresses_early_crosses() {
        // RSI is 0 at bar 0 and jumps above 80 at bar 1: a raw cross the
        // warmup must hide.
        let prices = [100.0, 110.0, 120.0, 130.0, 140.0, 150.0];
        let series = make_series(&prices);
        let frame = RsiThresholdCross::new(4, 80.0, 20.0).unwrap().generate_signals(&series);
        let rsi = frame.column("rsi").unwrap();

        assert!(rsi[0] <= 80.0 && rsi[1] > 80.0);
        assert!(frame.signals[..4].iter().all(|s| *s == Signal::Flat));
    }

    #[test]
    fn exposes_intermediate_columns() {
        let series = make_series(&[10.0, 11.0, 10.5]);
        let frame = RsiThresholdCross::default().generate_signals(&series);
        for name in ["avg_gain", "avg_loss", "rsi"] {
            assert_eq!(frame.column(name).map(|c| c.len()), Some(3), "{name}");
        }
        assert!(frame.signals.iter().all(|s| *s == Signal::Flat));
    }
}
