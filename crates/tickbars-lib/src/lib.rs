//! Download Dukascopy ticks and resample them into gap-filled bars.
//!
//! This is a facade crate that re-exports functionality from the tickbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickbars_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let instrument = InstrumentRegistry::global().require("eurusd")?;
//!     let client = DownloadClient::with_defaults()?;
//!     let range = DateRange::parse("2024-01-01", "2024-01-31")?;
//!
//!     let summary = download_ticks(&client, instrument, range, |_| {}).await;
//!     let bars = resample(&summary.ticks, Timeframe::Minute1);
//!     CsvFormatter::new().write_ohlcv(&bars, std::fs::File::create("eurusd.csv")?)?;
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbars_types::*;

// Re-export instrument registry
pub use tickbars_instruments::InstrumentRegistry;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use tickbars_fetch::{
    ClientConfig, DecompressError, DownloadClient, DownloadError, DownloadSummary, TickBatch,
    download_ticks, tick_stream, tick_stream_resilient,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use tickbars_aggregate::{Ohlcv, QualityReport, TickAggregator, fill_gaps, resample};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbars_format::{
    CsvFormatter, FormatError, Formatter, PriceRow, read_price_rows, read_price_rows_from_path,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use tickbars_format::ParquetFormatter;

// Re-export charting
#[cfg(feature = "plot")]
pub use tickbars_plot::{PlotError, ema, plot_csv, render_html};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbars_types::{
        Category, DateRange, DateRangeError, Instrument, RawTick, Result, Tick, TickbarsError,
        Timeframe,
    };

    pub use tickbars_instruments::InstrumentRegistry;

    #[cfg(feature = "fetch")]
    pub use tickbars_fetch::{
        ClientConfig, DownloadClient, DownloadSummary, TickBatch, download_ticks,
        tick_stream_resilient,
    };

    #[cfg(feature = "aggregate")]
    pub use tickbars_aggregate::{Ohlcv, QualityReport, resample};

    #[cfg(feature = "format")]
    pub use tickbars_format::{CsvFormatter, Formatter};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use tickbars_format::ParquetFormatter;

    #[cfg(feature = "plot")]
    pub use tickbars_plot::plot_csv;
}
