//! OHLCV bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One resampled bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bar open time (start of the bucket).
    pub timestamp: DateTime<Utc>,
    /// First mid price in the bucket.
    pub open: f64,
    /// Highest mid price in the bucket.
    pub high: f64,
    /// Lowest mid price in the bucket.
    pub low: f64,
    /// Last mid price in the bucket.
    pub close: f64,
    /// Last bid in the bucket.
    pub bid: f64,
    /// Last ask in the bucket.
    pub ask: f64,
    /// Mean tick spread (ask - bid) in the bucket.
    pub spread: f64,
    /// Sum of ask and bid volumes.
    pub volume: f64,
    /// Number of ticks in the bucket; zero for forward-filled bars.
    pub tick_count: u32,
}

impl Ohlcv {
    /// Creates a flat, zero-volume bar that carries `prev`'s close, bid, ask
    /// and spread into an empty bucket.
    #[must_use]
    pub const fn carried(timestamp: DateTime<Utc>, prev: &Self) -> Self {
        Self {
            timestamp,
            open: prev.close,
            high: prev.close,
            low: prev.close,
            close: prev.close,
            bid: prev.bid,
            ask: prev.ask,
            spread: prev.spread,
            volume: 0.0,
            tick_count: 0,
        }
    }

    /// Returns true if this bar was forward filled rather than built from ticks.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.tick_count == 0
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if the bar has (almost) no range.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.range().abs() < 1e-6
    }
}
