//! Diagnostic events reported by the backtest pipeline.

use crate::ports::diagnostic_port::DiagnosticPort;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    StrategyCreated {
        name: String,
        warmup_bars: usize,
    },
    /// The series is no longer than the strategy warmup, so every signal is
    /// flat by construction.
    InsufficientHistory {
        symbol: String,
        bars: usize,
        warmup_bars: usize,
    },
    SignalsGenerated {
        strategy: String,
        bars: usize,
        long: usize,
        short: usize,
        flat: usize,
    },
    ExecutionCompleted {
        symbol: String,
        bars: usize,
        trades: usize,
        final_equity: f64,
    },
    MetricsComputed {
        sharpe_ratio: f64,
        total_return: f64,
    },
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl DiagnosticPort for NullDiagnostics {
    fn record(&self, _event: &DiagnosticEvent) {}
}
