//! Strategy factory: converts a `StrategyConfig` into a runtime strategy.
//!
//! The config is a type tag plus a flat map of numeric parameters, the shape
//! a JSON body like `{"type": "rsi", "period": 14}` decodes into. Missing
//! parameters fall back to the strategy defaults; present but unusable ones
//! are rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::SigtraderError;

use super::ma_crossover::{self, MovingAverageCrossover};
use super::rsi_threshold::{self, RsiThresholdCross};
use super::SignalStrategy;

/// Known strategy type tags.
pub const STRATEGY_TYPES: [&str; 2] = [ma_crossover::STRATEGY_TYPE, rsi_threshold::STRATEGY_TYPE];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(rename = "type")]
    pub strategy_type: String,
    #[serde(flatten)]
    pub params: BTreeMap<String, f64>,
}

impl StrategyConfig {
    pub fn new(strategy_type: impl Into<String>) -> Self {
        StrategyConfig {
            strategy_type: strategy_type.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Decode from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, SigtraderError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Named f64 parameter, falling back to `default`.
fn param(config: &StrategyConfig, name: &str, default: f64) -> f64 {
    config.params.get(name).copied().unwrap_or(default)
}

/// Named count parameter, falling back to `default`. Fractional, negative or
/// non-finite values are rejected rather than truncated.
fn param_count(config: &StrategyConfig, name: &str, default: usize) -> Result<usize, SigtraderError> {
    let Some(&value) = config.params.get(name) else {
        return Ok(default);
    };
    let strategy = config.strategy_type.as_str();
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(SigtraderError::invalid_parameter(
            strategy,
            name,
            format!("must be a whole number, got {value}"),
        ));
    }
    if value <= 0.0 {
        return Err(SigtraderError::invalid_parameter(
            strategy,
            name,
            format!("must be positive, got {value}"),
        ));
    }
    Ok(value as usize)
}

// ─── Factory ─────────────────────────────────────────────────────────

/// Build the strategy named by `config.strategy_type`.
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn SignalStrategy>, SigtraderError> {
    match config.strategy_type.as_str() {
        ma_crossover::STRATEGY_TYPE => {
            let short_window =
                param_count(config, "short_window", ma_crossover::DEFAULT_SHORT_WINDOW)?;
            let long_window = param_count(config, "long_window", ma_crossover::DEFAULT_LONG_WINDOW)?;
            Ok(Box::new(MovingAverageCrossover::new(short_window, long_window)?))
        }
        rsi_threshold::STRATEGY_TYPE => {
            let period = param_count(config, "period", rsi_threshold::DEFAULT_PERIOD)?;
            let overbought = param(config, "overbought", rsi_threshold::DEFAULT_OVERBOUGHT);
            let oversold = param(config, "oversold", rsi_threshold::DEFAULT_OVERSOLD);
            Ok(Box::new(RsiThresholdCross::new(period, overbought, oversold)?))
        }
        other => Err(SigtraderError::UnknownStrategy(other.to_string())),
    }
}
