//! Backtest pipeline: strategy → signals → execution → metrics.
//!
//! BacktestConfig defines run parameters. Each run is a pure function of its
//! inputs; diagnostics go to the sink passed in by the caller.

use chrono::NaiveDate;
use serde::Serialize;

use super::diagnostic::DiagnosticEvent;
use super::error::SigtraderError;
use super::execution;
use super::metrics::Metrics;
use super::portfolio::{EquityPoint, ReturnPoint};
use super::series::PriceSeries;
use super::strategy::{create_strategy, SignalStrategy, StrategyConfig};
use super::trade::Trade;
use crate::ports::diagnostic_port::DiagnosticPort;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub emit_trades: bool,
    /// Inclusive date window applied by the data source, if any.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            emit_trades: true,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub symbol: String,
    pub strategy: String,
    pub initial_capital: f64,
    pub metrics: Metrics,
    pub equity_curve: Vec<EquityPoint>,
    pub returns: Vec<ReturnPoint>,
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    pub fn final_equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_capital)
    }

    /// Compounded return over the whole run, final_equity / initial - 1.
    pub fn cumulative_return(&self) -> f64 {
        self.final_equity() / self.initial_capital - 1.0
    }
}

/// Build the strategy from `strategy_config` and run it over `series`.
pub fn run_backtest(
    series: &PriceSeries,
    strategy_config: &StrategyConfig,
    config: &BacktestConfig,
    diagnostics: &dyn DiagnosticPort,
) -> Result<BacktestResult, SigtraderError> {
    let strategy = create_strategy(strategy_config)?;
    diagnostics.record(&DiagnosticEvent::StrategyCreated {
        name: strategy.name().to_string(),
        warmup_bars: strategy.warmup_bars(),
    });
    run_strategy(series, strategy.as_ref(), config, diagnostics)
}

/// Run an already-built strategy over `series`.
pub fn run_strategy(
    series: &PriceSeries,
    strategy: &dyn SignalStrategy,
    config: &BacktestConfig,
    diagnostics: &dyn DiagnosticPort,
) -> Result<BacktestResult, SigtraderError> {
    if series.len() <= strategy.warmup_bars() {
        diagnostics.record(&DiagnosticEvent::InsufficientHistory {
            symbol: series.symbol().to_string(),
            bars: series.len(),
            warmup_bars: strategy.warmup_bars(),
        });
    }

    let frame = strategy.generate_signals(series);
    let (long, short, flat) = frame.signal_counts();
    diagnostics.record(&DiagnosticEvent::SignalsGenerated {
        strategy: strategy.name().to_string(),
        bars: frame.len(),
        long,
        short,
        flat,
    });

    let execution = execution::run(&frame, config.initial_capital, config.emit_trades)?;
    diagnostics.record(&DiagnosticEvent::ExecutionCompleted {
        symbol: series.symbol().to_string(),
        bars: execution.equity_curve.len(),
        trades: execution.trades.len(),
        final_equity: execution
            .equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(config.initial_capital),
    });

    let metrics = Metrics::summarize(&execution.returns);
    diagnostics.record(&DiagnosticEvent::MetricsComputed {
        sharpe_ratio: metrics.sharpe_ratio,
        total_return: metrics.total_return,
    });

    Ok(BacktestResult {
        symbol: series.symbol().to_string(),
        strategy: strategy.name().to_string(),
        initial_capital: config.initial_capital,
        metrics,
        equity_curve: execution.equity_curve,
        returns: execution.returns,
        trades: execution.trades,
    })
}
