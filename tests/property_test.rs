//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Shape: one equity point and one return per bar, in bar order
//! 2. Lag: bar 0 always returns 0 and holds the starting capital
//! 3. Compounding: each equity point is the previous one times (1 + return)
//! 4. Equal MA windows never leave Flat
//! 5. Warmup bars are always Flat
//! 6. Trades never outnumber signal changes
//! 7. Sharpe is 0 for constant series and finite otherwise

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use sigtrader::domain::backtest::{run_backtest, BacktestConfig};
use sigtrader::domain::diagnostic::NullDiagnostics;
use sigtrader::domain::execution;
use sigtrader::domain::metrics::sharpe_ratio;
use sigtrader::domain::signal::Signal;
use sigtrader::domain::strategy::{create_strategy, StrategyConfig};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), 1..120)
}

fn arb_strategy_config() -> impl Strategy<Value = StrategyConfig> {
    prop_oneof![
        (1usize..30, 1usize..60).prop_map(|(s, l)| {
            StrategyConfig::new("ma_crossover")
                .with_param("short_window", s as f64)
                .with_param("long_window", l as f64)
        }),
        (1usize..30, 55.0..95.0_f64, 5.0..45.0_f64).prop_map(|(p, ob, os)| {
            StrategyConfig::new("rsi")
                .with_param("period", p as f64)
                .with_param("overbought", ob)
                .with_param("oversold", os)
        }),
    ]
}

fn sign_changes(signals: &[Signal]) -> usize {
    let mut prev = Signal::Flat;
    let mut changes = 0;
    for &s in signals {
        if s != prev {
            changes += 1;
        }
        prev = s;
    }
    changes
}

// ── 1-3. Execution shape, lag and compounding ────────────────────────

proptest! {
    #[test]
    fn one_point_per_bar(closes in arb_closes(), config in arb_strategy_config()) {
        let series = series_from_closes("PROP", &closes);
        let result = run_backtest(&series, &config, &BacktestConfig::default(), &NullDiagnostics)
            .unwrap();

        prop_assert_eq!(result.equity_curve.len(), closes.len());
        prop_assert_eq!(result.returns.len(), closes.len());
        for (point, bar) in result.equity_curve.iter().zip(series.bars()) {
            prop_assert_eq!(point.date, bar.date);
        }
    }

    #[test]
    fn first_bar_is_flat(
        closes in arb_closes(),
        config in arb_strategy_config(),
        capital in 100.0..1_000_000.0_f64,
    ) {
        let series = series_from_closes("PROP", &closes);
        let bt_config = BacktestConfig { initial_capital: capital, ..BacktestConfig::default() };
        let result = run_backtest(&series, &config, &bt_config, &NullDiagnostics).unwrap();

        prop_assert_eq!(result.returns[0].value, 0.0);
        prop_assert_eq!(result.equity_curve[0].equity, capital);
    }

    #[test]
    fn equity_compounds_returns(closes in arb_closes(), config in arb_strategy_config()) {
        let series = series_from_closes("PROP", &closes);
        let result = run_backtest(&series, &config, &BacktestConfig::default(), &NullDiagnostics)
            .unwrap();

        for t in 1..result.equity_curve.len() {
            let expected = result.equity_curve[t - 1].equity * (1.0 + result.returns[t].value);
            assert_relative_eq!(result.equity_curve[t].equity, expected, max_relative = 1e-9);
        }
    }
}

// ── 4-6. Signal invariants ───────────────────────────────────────────

proptest! {
    #[test]
    fn equal_windows_stay_flat(closes in arb_closes(), window in 1usize..40) {
        let series = series_from_closes("PROP", &closes);
        let config = StrategyConfig::new("ma_crossover")
            .with_param("short_window", window as f64)
            .with_param("long_window", window as f64);
        let frame = create_strategy(&config).unwrap().generate_signals(&series);

        prop_assert!(frame.signals.iter().all(|&s| s == Signal::Flat));
    }

    #[test]
    fn warmup_bars_are_flat(closes in arb_closes(), config in arb_strategy_config()) {
        let series = series_from_closes("PROP", &closes);
        let strategy = create_strategy(&config).unwrap();
        let frame = strategy.generate_signals(&series);

        let warmup = strategy.warmup_bars().min(frame.len());
        prop_assert!(frame.signals[..warmup].iter().all(|&s| s == Signal::Flat));
    }

    #[test]
    fn rsi_warmup_is_flat(closes in arb_closes(), period in 1usize..30) {
        let series = series_from_closes("PROP", &closes);
        let config = StrategyConfig::new("rsi").with_param("period", period as f64);
        let frame = create_strategy(&config).unwrap().generate_signals(&series);

        let warmup = period.min(frame.len());
        prop_assert!(frame.signals[..warmup].iter().all(|&s| s == Signal::Flat));
    }

    #[test]
    fn trades_bounded_by_signal_changes(closes in arb_closes(), config in arb_strategy_config()) {
        let series = series_from_closes("PROP", &closes);
        let frame = create_strategy(&config).unwrap().generate_signals(&series);
        let trades = execution::extract_trades(&frame);

        prop_assert!(trades.len() <= sign_changes(&frame.signals));
    }
}

// ── 7. Sharpe ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn sharpe_zero_for_constant(value in -0.5..0.5_f64, n in 0usize..50) {
        prop_assert_eq!(sharpe_ratio(&vec![value; n]), 0.0);
    }

    #[test]
    fn sharpe_is_finite(returns in prop::collection::vec(-0.5..0.5_f64, 0..100)) {
        prop_assert!(sharpe_ratio(&returns).is_finite());
    }
}
