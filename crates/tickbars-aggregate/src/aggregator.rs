//! Streaming tick-to-bar aggregation.

use chrono::{DateTime, Utc};
use tickbars_types::{Tick, Timeframe};

use crate::Ohlcv;

/// Streaming tick aggregator.
///
/// Ticks must arrive in ascending time order; a bar is emitted as soon as a
/// tick lands in a later bucket.
#[derive(Debug)]
pub struct TickAggregator {
    timeframe: Timeframe,
    current_bar: Option<OhlcvBuilder>,
}

impl TickAggregator {
    /// Creates a new aggregator for the given timeframe.
    #[must_use]
    pub const fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            current_bar: None,
        }
    }

    /// Returns the timeframe being aggregated to.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Processes a tick, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when a bar is completed by this tick,
    /// `None` otherwise.
    pub fn process(&mut self, tick: Tick) -> Option<Ohlcv> {
        let bar_start = bucket_start(tick.timestamp, self.timeframe);

        match self.current_bar.take() {
            Some(mut builder) if builder.timestamp == bar_start => {
                builder.update(&tick);
                self.current_bar = Some(builder);
                None
            }
            Some(builder) => {
                self.current_bar = Some(OhlcvBuilder::new(bar_start, &tick));
                Some(builder.finish())
            }
            None => {
                self.current_bar = Some(OhlcvBuilder::new(bar_start, &tick));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining partial bar.
    #[must_use]
    pub fn finish(self) -> Option<Ohlcv> {
        self.current_bar.map(OhlcvBuilder::finish)
    }
}

/// Returns the start of the bucket containing `timestamp`.
///
/// Buckets are aligned on the Unix epoch, so minute and hour buckets start on
/// wall-clock boundaries and daily buckets at 00:00 UTC.
#[must_use]
pub fn bucket_start(timestamp: DateTime<Utc>, timeframe: Timeframe) -> DateTime<Utc> {
    let ms = timestamp.timestamp_millis();
    let floored = ms - ms.rem_euclid(timeframe.milliseconds());
    DateTime::from_timestamp_millis(floored).unwrap_or(timestamp)
}

/// Builder for a single bar.
#[derive(Debug)]
struct OhlcvBuilder {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    bid: f64,
    ask: f64,
    spread_sum: f64,
    volume: f64,
    tick_count: u32,
}

impl OhlcvBuilder {
    fn new(timestamp: DateTime<Utc>, tick: &Tick) -> Self {
        let mid = tick.mid();
        Self {
            timestamp,
            open: mid,
            high: mid,
            low: mid,
            close: mid,
            bid: tick.bid,
            ask: tick.ask,
            spread_sum: tick.spread(),
            volume: tick.total_volume(),
            tick_count: 1,
        }
    }

    fn update(&mut self, tick: &Tick) {
        let mid = tick.mid();
        self.high = self.high.max(mid);
        self.low = self.low.min(mid);
        self.close = mid;
        self.bid = tick.bid;
        self.ask = tick.ask;
        self.spread_sum += tick.spread();
        self.volume += tick.total_volume();
        self.tick_count += 1;
    }

    fn finish(self) -> Ohlcv {
        Ohlcv {
            timestamp: self.timestamp,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            bid: self.bid,
            ask: self.ask,
            spread: self.spread_sum / f64::from(self.tick_count),
            volume: self.volume,
            tick_count: self.tick_count,
        }
    }
}
