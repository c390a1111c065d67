//! Single-instrument equity tracking.
//!
//! The portfolio starts at `initial_capital` and compounds one strategy
//! return per bar: equity[t] = equity[t-1] * (1 + r[t]).

use chrono::NaiveDate;
use serde::Serialize;

use super::trade::Trade;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    #[serde(rename = "timestamp")]
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnPoint {
    #[serde(rename = "timestamp")]
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub equity: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub returns: Vec<ReturnPoint>,
    pub trades: Vec<Trade>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Portfolio {
            equity: initial_capital,
            equity_curve: Vec::new(),
            returns: Vec::new(),
            trades: Vec::new(),
        }
    }

    /// Compound one bar's strategy return and record both series.
    pub fn apply_return(&mut self, date: NaiveDate, strategy_return: f64) {
        self.equity *= 1.0 + strategy_return;
        self.returns.push(ReturnPoint {
            date,
            value: strategy_return,
        });
        self.equity_curve.push(EquityPoint {
            date,
            equity: self.equity,
        });
    }

    pub fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }
}
