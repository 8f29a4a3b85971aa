//! HTTP client and bi5 decoding for the tickbars Dukascopy bar builder.
//!
//! This crate provides the data download pipeline:
//!
//! - [`url::tick_url`] - Constructs Dukascopy data URLs
//! - [`DownloadClient`] - HTTP client with connection pooling and backoff
//! - [`decompress_bi5`] - LZMA decompression
//! - [`parse_ticks`] - Binary tick record parsing
//! - [`tick_stream_resilient`] / [`download_ticks`] - Concurrent hourly download

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decompress;
mod parse;
mod stream;
pub mod url;

pub use client::{ClientConfig, DownloadClient, DownloadError};
pub use decompress::{DecompressError, decompress_bi5};
pub use parse::parse_ticks;
pub use stream::{DownloadSummary, TickBatch, download_ticks, tick_stream, tick_stream_resilient};
