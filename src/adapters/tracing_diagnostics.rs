//! Diagnostics sink that forwards pipeline events to `tracing`.

use tracing::{debug, info, warn};

use crate::domain::diagnostic::DiagnosticEvent;
use crate::ports::diagnostic_port::DiagnosticPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticPort for TracingDiagnostics {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::StrategyCreated { name, warmup_bars } => {
                debug!(strategy = %name, warmup_bars, "strategy created");
            }
            DiagnosticEvent::InsufficientHistory {
                symbol,
                bars,
                warmup_bars,
            } => {
                warn!(
                    %symbol,
                    bars,
                    warmup_bars,
                    "series shorter than strategy warmup, all signals will be flat"
                );
            }
            DiagnosticEvent::SignalsGenerated {
                strategy,
                bars,
                long,
                short,
                flat,
            } => {
                debug!(%strategy, bars, long, short, flat, "signals generated");
            }
            DiagnosticEvent::ExecutionCompleted {
                symbol,
                bars,
                trades,
                final_equity,
            } => {
                info!(%symbol, bars, trades, final_equity, "execution completed");
            }
            DiagnosticEvent::MetricsComputed {
                sharpe_ratio,
                total_return,
            } => {
                info!(sharpe_ratio, total_return, "metrics computed");
            }
        }
    }
}
