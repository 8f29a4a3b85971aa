//! Loading price rows back from a bar CSV.

use ::csv::{ReaderBuilder, StringRecord};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::FormatError;

/// One OHLC row read from a CSV file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRow {
    /// Row timestamp, when the file has a `timestamp` column.
    pub timestamp: Option<DateTime<Utc>>,
    /// Open price (falls back to close).
    pub open: f64,
    /// High price (falls back to close).
    pub high: f64,
    /// Low price (falls back to close).
    pub low: f64,
    /// Close price.
    pub close: f64,
}

/// Column positions resolved from the header row.
struct Columns {
    timestamp: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, FormatError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Ok(Self {
            timestamp: find("timestamp"),
            open: find("open"),
            high: find("high"),
            low: find("low"),
            close: find("close").ok_or_else(|| FormatError::MissingColumn("close".into()))?,
        })
    }
}

/// Reads OHLC rows from CSV data with a header row.
///
/// Only `close` is required; missing `open`, `high` and `low` columns take
/// the close value. Rows keep file order.
///
/// # Errors
///
/// Returns [`FormatError::MissingColumn`] without a `close` column and
/// [`FormatError::InvalidValue`] for cells that do not parse.
pub fn read_price_rows<R: Read>(reader: R) -> Result<Vec<PriceRow>, FormatError> {
    let mut csv_reader = ReaderBuilder::new().trim(::csv::Trim::All).from_reader(reader);
    let columns = Columns::resolve(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, ::csv::Position::line);

        let close = parse_price(&record, columns.close, "close", line)?;
        let price_or_close = |idx: Option<usize>, name: &str| match idx {
            Some(idx) => parse_price(&record, idx, name, line),
            None => Ok(close),
        };

        rows.push(PriceRow {
            timestamp: columns
                .timestamp
                .map(|idx| parse_timestamp(field(&record, idx), line))
                .transpose()?,
            open: price_or_close(columns.open, "open")?,
            high: price_or_close(columns.high, "high")?,
            low: price_or_close(columns.low, "low")?,
            close,
        });
    }

    Ok(rows)
}

/// Reads OHLC rows from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn read_price_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<PriceRow>, FormatError> {
    read_price_rows(File::open(path)?)
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or_default()
}

fn parse_price(record: &StringRecord, idx: usize, column: &str, line: u64) -> Result<f64, FormatError> {
    let raw = field(record, idx);
    raw.parse().map_err(|_| FormatError::InvalidValue {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn parse_timestamp(raw: &str, line: u64) -> Result<DateTime<Utc>, FormatError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|_| FormatError::InvalidValue {
            line,
            column: "timestamp".to_string(),
            value: raw.to_string(),
        })
}
