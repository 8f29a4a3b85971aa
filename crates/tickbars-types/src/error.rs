//! Error types for tickbars.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for tickbars operations.
pub type Result<T> = std::result::Result<T, TickbarsError>;

/// Errors that can occur while downloading and processing tick data.
#[derive(Error, Debug)]
pub enum TickbarsError {
    /// HTTP request failed after all retries.
    #[error("HTTP error: {0}")]
    Http(String),

    /// LZMA decompression failed.
    #[error("Decompression error: {0}")]
    Decompress(String),

    /// Unknown instrument symbol.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Invalid date range.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    /// No ticks were downloaded for the requested period.
    #[error("No data available for {instrument} in requested range")]
    NoDataAvailable {
        /// The instrument that had no data.
        instrument: String,
    },
}

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// Date string is not `YYYY-MM-DD`.
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Year cannot be represented.
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
}
