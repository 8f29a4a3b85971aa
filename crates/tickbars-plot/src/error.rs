//! Plot error type.

use std::path::PathBuf;
use thiserror::Error;
use tickbars_format::FormatError;

/// Errors that can occur while rendering a chart.
#[derive(Error, Debug)]
pub enum PlotError {
    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input file has a header but no rows.
    #[error("No rows in {}", .0.display())]
    Empty(PathBuf),

    /// EMA span must be at least one.
    #[error("Invalid EMA span: {0}")]
    InvalidSpan(usize),

    /// CSV could not be read.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Chart could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
