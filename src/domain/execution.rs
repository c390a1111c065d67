//! Signal execution with a one-bar lag.
//!
//! A signal observed on bar t can only be acted on from bar t+1, so the
//! position held during bar t is the signal of bar t-1 (flat on bar 0).
//! Each bar's strategy return is position * close-to-close return, and the
//! equity curve is the running product of (1 + strategy return) scaled by
//! the starting capital.

use super::error::SigtraderError;
use super::portfolio::{EquityPoint, Portfolio, ReturnPoint};
use super::signal::Signal;
use super::strategy::SignalFrame;
use super::trade::{Trade, TradeAction};

/// Equity curve, strategy returns and trades of one run. The two series
/// carry exactly one entry per input bar, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub equity_curve: Vec<EquityPoint>,
    pub returns: Vec<ReturnPoint>,
    pub trades: Vec<Trade>,
}

impl From<Portfolio> for ExecutionResult {
    fn from(portfolio: Portfolio) -> Self {
        ExecutionResult {
            equity_curve: portfolio.equity_curve,
            returns: portfolio.returns,
            trades: portfolio.trades,
        }
    }
}

/// Close-to-close simple returns, close[t] / close[t-1] - 1. The first bar
/// has no prior close and returns 0. A bar following a zero close also
/// returns 0, since the ratio is undefined. Negative closes use the plain
/// ratio.
pub fn bar_returns(closes: &[f64]) -> Vec<f64> {
    (0..closes.len())
        .map(|i| {
            if i == 0 || closes[i - 1] == 0.0 {
                0.0
            } else {
                closes[i] / closes[i - 1] - 1.0
            }
        })
        .collect()
}

/// Position held during each bar: the previous bar's signal, Flat on bar 0.
pub fn lagged_positions(signals: &[Signal]) -> Vec<Signal> {
    std::iter::once(Signal::Flat)
        .chain(signals.iter().copied())
        .take(signals.len())
        .collect()
}

/// Trades at every bar where the raw signal changes to Long (buy) or Short
/// (sell). A change to Flat records nothing. The first bar compares against
/// Flat.
pub fn extract_trades(frame: &SignalFrame<'_>) -> Vec<Trade> {
    let mut trades = Vec::new();
    let mut prev = Signal::Flat;

    for (bar, &signal) in frame.series.bars().iter().zip(&frame.signals) {
        if signal != prev {
            let action = match signal {
                Signal::Long => Some(TradeAction::Buy),
                Signal::Short => Some(TradeAction::Sell),
                Signal::Flat => None,
            };
            if let Some(action) = action {
                trades.push(Trade {
                    date: bar.date,
                    action,
                    price: bar.close,
                });
            }
        }
        prev = signal;
    }

    trades
}

/// Run the frame's signals against its closes.
///
/// Fails with `DataContract` when the signal column does not cover every bar
/// and with `ConfigInvalid` when `initial_capital` is not a positive finite
/// number. Nothing is computed in either case.
pub fn run(
    frame: &SignalFrame<'_>,
    initial_capital: f64,
    emit_trades: bool,
) -> Result<ExecutionResult, SigtraderError> {
    if frame.signals.len() != frame.series.len() {
        return Err(SigtraderError::data_contract(format!(
            "signal column has {} entries for {} bars of {}",
            frame.signals.len(),
            frame.series.len(),
            frame.series.symbol()
        )));
    }
    if !initial_capital.is_finite() || initial_capital <= 0.0 {
        return Err(SigtraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "initial_capital".into(),
            reason: format!("must be a positive number, got {initial_capital}"),
        });
    }

    let bars = frame.series.bars();
    let returns = bar_returns(&frame.series.closes());
    let positions = lagged_positions(&frame.signals);

    let mut portfolio = Portfolio::new(initial_capital);
    for ((bar, position), bar_return) in bars.iter().zip(&positions).zip(&returns) {
        portfolio.apply_return(bar.date, position.as_f64() * bar_return);
    }

    if emit_trades {
        for trade in extract_trades(frame) {
            portfolio.record_trade(trade);
        }
    }

    Ok(portfolio.into())
}
