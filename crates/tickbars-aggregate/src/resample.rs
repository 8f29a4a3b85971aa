//! Whole-series resampling with forward fill.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use tickbars_types::{Tick, Timeframe};

use crate::{Ohlcv, TickAggregator, bucket_start};

/// Resamples ticks into a continuous bar series.
///
/// Unordered input is sorted by time on a copy first. The result covers
/// every bucket from the one holding the first tick up to the bucket boundary
/// at or after the last tick; buckets without ticks are forward filled (see [`Ohlcv::carried`]).
/// Returns an empty series for empty input.
#[must_use]
pub fn resample(ticks: &[Tick], timeframe: Timeframe) -> Vec<Ohlcv> {
    let Some(last_tick) = ticks.iter().map(|t| t.timestamp).max() else {
        return Vec::new();
    };

    let sorted: Cow<'_, [Tick]> = if ticks.is_sorted_by_key(|t| t.timestamp) {
        Cow::Borrowed(ticks)
    } else {
        let mut owned = ticks.to_vec();
        owned.sort_by_key(|t| t.timestamp);
        Cow::Owned(owned)
    };

    let mut aggregator = TickAggregator::new(timeframe);
    let mut bars: Vec<Ohlcv> = sorted
        .iter()
        .filter_map(|tick| aggregator.process(*tick))
        .collect();
    bars.extend(aggregator.finish());

    fill_gaps(&bars, timeframe, bucket_ceil(last_tick, timeframe))
}

/// Inserts carried bars for every missing bucket between `bars` and after the
/// last bar up to and including `until`.
///
/// `bars` must be sorted and aligned to `timeframe`.
#[must_use]
pub fn fill_gaps(bars: &[Ohlcv], timeframe: Timeframe, until: DateTime<Utc>) -> Vec<Ohlcv> {
    let step = timeframe.duration();
    let mut filled: Vec<Ohlcv> = Vec::with_capacity(bars.len());

    for bar in bars {
        if let Some(prev) = filled.last().copied() {
            let mut next = prev.timestamp + step;
            while next < bar.timestamp {
                filled.push(Ohlcv::carried(next, &prev));
                next += step;
            }
        }
        filled.push(*bar);
    }

    if let Some(prev) = filled.last().copied() {
        let mut next = prev.timestamp + step;
        while next <= until {
            filled.push(Ohlcv::carried(next, &prev));
            next += step;
        }
    }

    filled
}

/// Smallest bucket boundary at or after `timestamp`.
fn bucket_ceil(timestamp: DateTime<Utc>, timeframe: Timeframe) -> DateTime<Utc> {
    let start = bucket_start(timestamp, timeframe);
    if start == timestamp {
        start
    } else {
        start + timeframe.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 9, minute, second).unwrap()
    }

    fn tick(ts: DateTime<Utc>, bid: f64) -> Tick {
        Tick::new(ts, bid + 0.0002, bid, 1.0, 1.0)
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], Timeframe::Minute1).is_empty());
    }

    #[test]
    fn test_gap_is_forward_filled() {
        let ticks = [
            tick(at(0, 10), 1.1000),
            tick(at(0, 40), 1.1010),
            tick(at(3, 20), 1.0990),
        ];
        let bars = resample(&ticks, Timeframe::Minute1);

        // 09:00 .. 09:04 inclusive; 09:04 is the ceiling of the last tick
        let stamps: Vec<_> = bars.iter().map(|b| b.timestamp).collect();
        assert_eq!(stamps, [at(0, 0), at(1, 0), at(2, 0), at(3, 0), at(4, 0)]);

        let first = bars[0];
        assert_eq!(first.tick_count, 2);
        assert_relative_eq!(first.close, 1.1011, epsilon = 1e-10);

        for filled in &bars[1..3] {
            assert!(filled.is_filled());
            assert_eq!(filled.open, first.close);
            assert_eq!(filled.high, first.close);
            assert_eq!(filled.low, first.close);
            assert_eq!(filled.close, first.close);
            assert_eq!(filled.bid, first.bid);
            assert_eq!(filled.ask, first.ask);
            assert_eq!(filled.spread, first.spread);
            assert_eq!(filled.volume, 0.0);
        }

        assert_eq!(bars[3].tick_count, 1);
        assert!(bars[4].is_filled());
        assert_eq!(bars[4].close, bars[3].close);
    }

    #[test]
    fn test_last_tick_on_boundary_adds_no_trailing_bar() {
        let ticks = [tick(at(0, 10), 1.1000), tick(at(2, 0), 1.1001)];
        let bars = resample(&ticks, Timeframe::Minute1);

        assert_eq!(bars.len(), 3);
        assert_eq!(bars.last().unwrap().timestamp, at(2, 0));
        assert_eq!(bars.last().unwrap().tick_count, 1);
    }

    #[test]
    fn test_unsorted_input_and_contiguity() {
        let ticks = [
            tick(at(7, 5), 1.2),
            tick(at(0, 1), 1.1),
            tick(at(4, 59), 1.3),
        ];
        let bars = resample(&ticks, Timeframe::Minute1);

        assert_eq!(bars.first().unwrap().timestamp, at(0, 0));
        assert_eq!(bars.last().unwrap().timestamp, at(8, 0));
        for pair in bars.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, TimeDelta::minutes(1));
        }
        for bar in &bars {
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.open.min(bar.close));
        }
        assert_eq!(bars.iter().filter(|b| !b.is_filled()).count(), 3);
    }

    #[test]
    fn test_sorted_and_shuffled_input_agree() {
        let ticks = [
            tick(at(0, 5), 1.1),
            tick(at(0, 50), 1.3),
            tick(at(2, 10), 1.2),
            tick(at(2, 11), 1.0),
        ];
        let shuffled = [ticks[2], ticks[0], ticks[3], ticks[1]];

        assert_eq!(
            resample(&ticks, Timeframe::Minute1),
            resample(&shuffled, Timeframe::Minute1)
        );
    }

    #[test]
    fn test_five_minute_buckets() {
        let ticks = [tick(at(1, 0), 1.0), tick(at(12, 0), 1.0)];
        let bars = resample(&ticks, Timeframe::Minute5);

        let stamps: Vec<_> = bars.iter().map(|b| b.timestamp).collect();
        assert_eq!(stamps, [at(0, 0), at(5, 0), at(10, 0), at(15, 0)]);
    }
}
