//! Tick-to-bar resampling and gap filling for tickbars.
//!
//! - [`Ohlcv`] - Bar with mid-price OHLC, last bid/ask, mean spread and volume
//! - [`TickAggregator`] - Streaming tick aggregator
//! - [`resample`] - Sorted, gap-free bar series from a batch of ticks
//! - [`QualityReport`] - Summary statistics logged after a download

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod ohlcv;
mod quality;
mod resample;

pub use aggregator::{TickAggregator, bucket_start};
pub use ohlcv::Ohlcv;
pub use quality::QualityReport;
pub use resample::{fill_gaps, resample};
