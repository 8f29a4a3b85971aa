//! Price charts with EMA overlays for tickbars bar files.
//!
//! - [`ema`] - Exponential moving average of a series
//! - [`render_html`] - Standalone plotly.js candlestick page
//! - [`plot_csv`] - Reads a bar CSV and writes the chart next to it

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chart;
mod ema;
mod error;

pub use chart::{FAST_SPAN, SLOW_SPAN, chart_path, chart_title, plot_csv, render_html};
pub use ema::ema;
pub use error::PlotError;
