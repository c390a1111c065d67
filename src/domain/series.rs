//! Validated, position-ordered price series.
//!
//! A `PriceSeries` is built once by a data adapter and is read-only afterwards.
//! Bars keep the order they were supplied in: dates are expected to increase
//! but nothing downstream relies on it.

use chrono::NaiveDate;

use super::error::SigtraderError;
use super::ohlcv::OhlcvBar;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Validate and wrap `bars`.
    ///
    /// Fails with `DataContract` when the series is empty or when any field is
    /// NaN or infinite. Zero and negative closes are valid prices.
    pub fn new(symbol: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, SigtraderError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(SigtraderError::data_contract(format!(
                "price series for {symbol} has no bars"
            )));
        }

        for (i, bar) in bars.iter().enumerate() {
            if let Some(field) = bar.non_finite_field() {
                return Err(SigtraderError::data_contract(format!(
                    "bar {i} ({}) of {symbol}: {field} is not finite",
                    bar.date
                )));
            }
        }

        Ok(PriceSeries { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for slice-like ergonomics.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// First and last date in positional order.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let first = self.bars.first().map(|b| b.date).unwrap_or_default();
        let last = self.bars.last().map(|b| b.date).unwrap_or_default();
        (first, last)
    }
}
