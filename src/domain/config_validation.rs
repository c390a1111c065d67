//! Configuration validation.
//!
//! Validates the `[backtest]` and `[strategy]` sections before a run.

use crate::domain::error::SigtraderError;
use crate::domain::strategy::factory::STRATEGY_TYPES;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    validate_initial_capital(config)?;
    validate_emit_trades(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    validate_strategy_type(config)?;
    validate_strategy_params(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let Some(raw) = config.get_string("backtest", "initial_capital") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(SigtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be a positive number".to_string(),
        }),
    }
}

fn validate_emit_trades(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let Some(raw) = config.get_string("backtest", "emit_trades") else {
        return Ok(());
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "false" | "no" | "0" => Ok(()),
        _ => Err(SigtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "emit_trades".to_string(),
            reason: "emit_trades must be true or false".to_string(),
        }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(SigtraderError::ConfigInvalid {
                section: "backtest".to_string(),
                key: "start_date".to_string(),
                reason: "start_date must be before end_date".to_string(),
            });
        }
    }
    Ok(())
}

/// Parse an optional `YYYY-MM-DD` key from `[backtest]`.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    field: &str,
) -> Result<Option<NaiveDate>, SigtraderError> {
    match config.get_string("backtest", field) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Some)
            .map_err(|_| SigtraderError::ConfigInvalid {
                section: "backtest".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }),
    }
}

fn validate_strategy_type(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    match config.get_string("strategy", "type") {
        Some(t) if STRATEGY_TYPES.contains(&t.trim()) => Ok(()),
        Some(t) if !t.trim().is_empty() => Err(SigtraderError::UnknownStrategy(t.trim().to_string())),
        _ => Err(SigtraderError::ConfigMissing {
            section: "strategy".to_string(),
            key: "type".to_string(),
        }),
    }
}

fn validate_strategy_params(config: &dyn ConfigPort) -> Result<(), SigtraderError> {
    for key in config.keys("strategy") {
        if key == "type" {
            continue;
        }
        let raw = config.get_string("strategy", &key).unwrap_or_default();
        if raw.trim().parse::<f64>().is_err() {
            return Err(SigtraderError::ConfigInvalid {
                section: "strategy".to_string(),
                key,
                reason: format!("expected a number, got {:?}", raw),
            });
        }
    }
    Ok(())
}
