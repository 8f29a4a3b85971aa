//! CSV and Parquet output for the tickbars Dukascopy bar builder.
//!
//! - [`CsvFormatter`] - CSV/TSV writer for bars and ticks
//! - [`read_price_rows`] - Loads OHLC rows back from a bar CSV
//! - [`ParquetFormatter`] - Apache Parquet writer (feature `parquet`)

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod reader;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter};
pub use reader::{PriceRow, read_price_rows, read_price_rows_from_path};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
