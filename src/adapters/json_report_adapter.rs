//! JSON report adapter.
//!
//! Writes the serialized backtest result: strategy name, metrics, equity
//! curve, per-bar returns and trades, with dates as `YYYY-MM-DD` timestamps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::SigtraderError;
use crate::ports::report_port::ReportPort;

/// Pretty-printed JSON, one report per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), SigtraderError> {
        let mut writer = BufWriter::new(File::create(output_path)?);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::Metrics;
    use crate::domain::portfolio::{EquityPoint, ReturnPoint};
    use crate::domain::trade::{Trade, TradeAction};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tempfile::TempDir;

    fn sample_result() -> BacktestResult {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        BacktestResult {
            symbol: "SPY".into(),
            strategy: "RSI".into(),
            initial_capital: 10_000.0,
            metrics: Metrics {
                sharpe_ratio: 1.5,
                total_return: 0.1,
            },
            equity_curve: vec![
                EquityPoint {
                    date: d1,
                    equity: 10_000.0,
                },
                EquityPoint {
                    date: d2,
                    equity: 11_000.0,
                },
            ],
            returns: vec![
                ReturnPoint { date: d1, value: 0.0 },
                ReturnPoint { date: d2, value: 0.1 },
            ],
            trades: vec![Trade {
                date: d1,
                action: TradeAction::Buy,
                price: 100.0,
            }],
        }
    }

    #[test]
    fn written_report_has_expected_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        JsonReportAdapter::new()
            .write(&sample_result(), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("}\n"));
        let value: Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["strategy"], "RSI");
        assert_eq!(value["metrics"]["sharpe_ratio"], 1.5);
        assert_eq!(value["equity_curve"][1]["timestamp"], "2024-01-03");
        assert_eq!(value["equity_curve"][1]["equity"], 11_000.0);
        assert_eq!(value["returns"][1]["return"], 0.1);
        assert_eq!(value["trades"][0]["action"], "buy");
        assert_eq!(value["trades"][0]["price"], 100.0);
    }

    #[test]
    fn write_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        JsonReportAdapter::new()
            .write(&sample_result(), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["symbol"], "SPY");
        assert_eq!(value["returns"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = JsonReportAdapter::new()
            .write(&sample_result(), &path)
            .unwrap_err();
        assert!(matches!(err, SigtraderError::Io(_)));
    }
}
