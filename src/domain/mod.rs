//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod signal;
pub mod indicator;
pub mod strategy;
pub mod trade;
pub mod portfolio;
pub mod execution;
pub mod metrics;
pub mod backtest;
pub mod diagnostic;
pub mod config_validation;
pub mod error;
