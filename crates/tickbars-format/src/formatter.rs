//! Output format abstraction.

use std::io::Write;
use thiserror::Error;
use tickbars_aggregate::Ohlcv;
use tickbars_types::Tick;

/// Errors that can occur while writing or reading data files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// A required column is absent from the CSV header.
    #[error("CSV must contain a '{0}' column")]
    MissingColumn(String),

    /// A cell could not be parsed.
    #[error("Invalid {column} value '{value}' on line {line}")]
    InvalidValue {
        /// 1-based line number in the file.
        line: u64,
        /// Column name.
        column: String,
        /// Raw cell content.
        value: String,
    },

    /// Arrow/Parquet error.
    #[error("Parquet error: {0}")]
    Parquet(String),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes tick data to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ticks<W: Write + Send>(&self, ticks: &[Tick], writer: W) -> Result<(), FormatError>;

    /// Writes bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ohlcv<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
