//! Diagnostics sink port.

use crate::domain::diagnostic::DiagnosticEvent;

/// Receives diagnostic events from the backtest pipeline. Implementations
/// must not fail; a sink that cannot deliver an event drops it.
pub trait DiagnosticPort {
    fn record(&self, event: &DiagnosticEvent);
}
