//! Core types for the tickbars Dukascopy bar builder.
//!
//! This crate provides the data structures shared by every tickbars crate:
//!
//! - [`Tick`] - A single quote with timestamp, ask, bid, and volumes
//! - [`RawTick`] - Undecoded tick record from a bi5 file
//! - [`Instrument`] - Tradable symbol with its price precision
//! - [`Timeframe`] - Bar width used for resampling
//! - [`DateRange`] - Inclusive date range with hourly iteration

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod instrument;
mod tick;
mod timeframe;

pub use date_range::{DateRange, HourIterator};
pub use error::{DateRangeError, Result, TickbarsError};
pub use instrument::{Category, Instrument};
pub use tick::{RawTick, Tick};
pub use timeframe::{Timeframe, TimeframeParseError};
