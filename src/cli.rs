//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::tracing_diagnostics::TracingDiagnostics;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult, DEFAULT_INITIAL_CAPITAL};
use crate::domain::config_validation::{
    parse_optional_date, validate_backtest_config, validate_strategy_config,
};
use crate::domain::error::SigtraderError;
use crate::domain::series::PriceSeries;
use crate::domain::strategy::{create_strategy, StrategyConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "sigtrader", about = "Single-asset signal strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Price history file, used instead of the symbol lookup
        #[arg(long, conflicts_with_all = ["symbol", "data_dir"])]
        data: Option<PathBuf>,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Strategy as JSON, e.g. '{"type":"rsi","period":14}'
        #[arg(long)]
        strategy_json: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        no_trades: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in a data directory
    ListSymbols {
        #[arg(long)]
        data_dir: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            symbol,
            data_dir,
            strategy_json,
            output,
            no_trades,
        } => {
            let source = DataSource {
                file: data,
                symbol,
                data_dir,
            };
            run_backtest(
                &config,
                &source,
                strategy_json.as_deref(),
                output.as_deref(),
                no_trades,
            )
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { data_dir } => run_list_symbols(&data_dir),
    }
}

fn fail(err: SigtraderError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(&err)
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SigtraderError> {
    FileConfigAdapter::from_file(path).map_err(|e| SigtraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Where the price history comes from. Command-line values override the
/// `[backtest]` section.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    pub file: Option<PathBuf>,
    pub symbol: Option<String>,
    pub data_dir: Option<PathBuf>,
}

fn run_backtest(
    config_path: &Path,
    source: &DataSource,
    strategy_json: Option<&str>,
    output_path: Option<&Path>,
    no_trades: bool,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    if let Err(e) = validate_backtest_config(&adapter) {
        return fail(e);
    }

    // Stage 2: Strategy and run parameters
    let strategy_config = match build_strategy_config(&adapter, strategy_json) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    let mut bt_config = match build_backtest_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };
    if no_trades {
        bt_config.emit_trades = false;
    }
    eprintln!("Loading strategy: {}", strategy_config.strategy_type);

    // Stage 3: Price history
    let series = match resolve_series(&adapter, source, &bt_config) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let (first, last) = series.date_range();
    eprintln!(
        "Running backtest: {} bars of {}, {} to {}",
        series.len(),
        series.symbol(),
        first,
        last,
    );

    // Stage 4: Run
    let result = match backtest_engine::run_backtest(
        &series,
        &strategy_config,
        &bt_config,
        &TracingDiagnostics,
    ) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    if let Err(e) = write_summary(&mut io::stdout().lock(), &result) {
        return fail(e.into());
    }

    // Stage 5: Report
    if let Some(output) = output_path {
        if let Err(e) = JsonReportAdapter::new().write(&result, output) {
            return fail(e);
        }
        eprintln!("\nReport written to: {}", output.display());
    }

    ExitCode::SUCCESS
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, SigtraderError> {
    Ok(BacktestConfig {
        initial_capital: adapter.get_double("backtest", "initial_capital", DEFAULT_INITIAL_CAPITAL),
        emit_trades: adapter.get_bool("backtest", "emit_trades", true),
        start_date: parse_optional_date(adapter, "start_date")?,
        end_date: parse_optional_date(adapter, "end_date")?,
    })
}

/// Strategy from `--strategy-json` when given, otherwise the `[strategy]`
/// section.
pub fn build_strategy_config(
    adapter: &dyn ConfigPort,
    json_override: Option<&str>,
) -> Result<StrategyConfig, SigtraderError> {
    if let Some(json) = json_override {
        return StrategyConfig::from_json(json).map_err(|e| SigtraderError::ConfigParse {
            file: "--strategy-json".to_string(),
            reason: e.to_string(),
        });
    }

    validate_strategy_config(adapter)?;
    let strategy_type = adapter
        .get_string("strategy", "type")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    let mut config = StrategyConfig::new(strategy_type);
    for key in adapter.keys("strategy") {
        if key == "type" {
            continue;
        }
        let raw = adapter.get_string("strategy", &key).unwrap_or_default();
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| SigtraderError::ConfigInvalid {
                section: "strategy".into(),
                key: key.clone(),
                reason: format!("expected a number, got {:?}", raw),
            })?;
        config = config.with_param(key, value);
    }
    Ok(config)
}

pub fn resolve_series(
    adapter: &dyn ConfigPort,
    source: &DataSource,
    bt_config: &BacktestConfig,
) -> Result<PriceSeries, SigtraderError> {
    if let Some(file) = &source.file {
        eprintln!("Loading price history from {}", file.display());
        return CsvAdapter::load_file(file);
    }

    let symbol = source
        .symbol
        .clone()
        .or_else(|| adapter.get_string("backtest", "symbol"))
        .ok_or_else(|| SigtraderError::ConfigMissing {
            section: "backtest".into(),
            key: "symbol".into(),
        })?;
    let data_dir = source
        .data_dir
        .clone()
        .or_else(|| adapter.get_string("backtest", "data_dir").map(PathBuf::from))
        .ok_or_else(|| SigtraderError::ConfigMissing {
            section: "backtest".into(),
            key: "data_dir".into(),
        })?;

    eprintln!("Loading {} from {}", symbol, data_dir.display());
    CsvAdapter::new(data_dir).fetch_series(&symbol, bt_config.start_date, bt_config.end_date)
}

/// Result summary for stdout. Progress messages go to stderr.
pub fn write_summary(out: &mut impl Write, result: &BacktestResult) -> io::Result<()> {
    writeln!(out, "\n=== {} on {} ===", result.strategy, result.symbol)?;
    writeln!(out, "Sharpe Ratio:     {:.2}", result.metrics.sharpe_ratio)?;
    writeln!(out, "Last Return:      {:.2}%", result.metrics.total_return * 100.0)?;
    writeln!(out, "Cumulative:       {:.2}%", result.cumulative_return() * 100.0)?;
    writeln!(out, "Final Equity:     {:.2}", result.final_equity())?;
    writeln!(out, "Trades:           {}", result.trades.len())
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    if let Err(e) = validate_backtest_config(&adapter) {
        return fail(e);
    }

    let strategy = match build_strategy_config(&adapter, None).and_then(|c| create_strategy(&c)) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    eprintln!("\nStrategy: {}", strategy.name());
    eprintln!("  warmup bars: {}", strategy.warmup_bars());
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(data_dir: &Path) -> ExitCode {
    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    match data_port.list_symbols() {
        Ok(symbols) if symbols.is_empty() => {
            eprintln!("No symbols found in {}", data_dir.display());
            ExitCode::SUCCESS
        }
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            eprintln!("{} symbols found", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}
