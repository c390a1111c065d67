//! CSV file data adapter.
//!
//! Reads `<SYMBOL>.csv` files from a base directory. Columns are addressed by
//! header name (case-insensitive): `date` (or `timestamp`) and `close` are
//! required; `open`, `high` and `low` default to the close and `volume` to 0.

use crate::domain::error::SigtraderError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Load a single file, such as an uploaded price history, with no date
    /// filter. Rows stay in file order. The symbol is the file stem.
    pub fn load_file(path: &Path) -> Result<PriceSeries, SigtraderError> {
        let symbol = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "UPLOAD".to_string());
        let bars = read_bars(path, None, None)?;
        if bars.is_empty() {
            return Err(SigtraderError::NoData { symbol });
        }
        PriceSeries::new(symbol, bars)
    }
}

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, SigtraderError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let missing = |column: &str| {
            SigtraderError::data_contract(format!(
                "{} has no {} column",
                path.display(),
                column
            ))
        };

        Ok(Columns {
            date: find(&["date", "timestamp"]).ok_or_else(|| missing("date"))?,
            open: find(&["open"]),
            high: find(&["high"]),
            low: find(&["low"]),
            close: find(&["close"]).ok_or_else(|| missing("close"))?,
            volume: find(&["volume"]),
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, SigtraderError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .map_err(|e| SigtraderError::DataSource {
            reason: format!("invalid date {:?}: {}", raw, e),
        })
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, SigtraderError> {
    let raw = record.get(index).ok_or_else(|| SigtraderError::DataSource {
        reason: format!("missing {} value", name),
    })?;
    raw.trim().parse().map_err(|e| SigtraderError::DataSource {
        reason: format!("invalid {} value {:?}: {}", name, raw, e),
    })
}

fn read_bars(
    path: &Path,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<OhlcvBar>, SigtraderError> {
    let content = fs::read_to_string(path).map_err(|e| SigtraderError::DataSource {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| SigtraderError::DataSource {
        reason: format!("CSV header error: {}", e),
    })?;
    let cols = Columns::from_headers(headers, path)?;

    let mut bars = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| SigtraderError::DataSource {
            reason: format!("CSV parse error: {}", e),
        })?;

        let date = parse_date(record.get(cols.date).unwrap_or_default())?;
        if start_date.is_some_and(|s| date < s) || end_date.is_some_and(|e| date > e) {
            continue;
        }

        let close = parse_field(&record, cols.close, "close")?;
        let optional = |index: Option<usize>, name: &str, default: f64| match index {
            Some(i) => parse_field(&record, i, name),
            None => Ok(default),
        };

        bars.push(OhlcvBar {
            date,
            open: optional(cols.open, "open", close)?,
            high: optional(cols.high, "high", close)?,
            low: optional(cols.low, "low", close)?,
            close,
            volume: optional(cols.volume, "volume", 0.0)?,
        });
    }

    Ok(bars)
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, SigtraderError> {
        let mut bars = read_bars(&self.csv_path(symbol), start_date, end_date)?;
        // stable: bars sharing a date keep file order
        bars.sort_by_key(|b| b.date);
        if bars.is_empty() {
            return Err(SigtraderError::NoData {
                symbol: symbol.to_string(),
            });
        }
        PriceSeries::new(symbol, bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SigtraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SigtraderError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| SigtraderError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
