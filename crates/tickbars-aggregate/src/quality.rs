//! Data quality summary of a bar series.

use chrono::{DateTime, Utc};

use crate::Ohlcv;

/// Spread multiplier used to express spreads in pips.
const PIP_FACTOR: f64 = 10_000.0;

/// Statistics describing a resampled series.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    /// Timestamp of the first bar.
    pub first: DateTime<Utc>,
    /// Timestamp of the last bar.
    pub last: DateTime<Utc>,
    /// Number of bars.
    pub bars: usize,
    /// Bars that were forward filled.
    pub filled_bars: usize,
    /// Mean bar spread in pips.
    pub mean_spread_pips: f64,
    /// Largest bar spread in pips.
    pub max_spread_pips: f64,
    /// Bars whose high equals their low.
    pub flat_bars: usize,
}

impl QualityReport {
    /// Computes the report, or `None` for an empty series.
    #[must_use]
    pub fn from_bars(bars: &[Ohlcv]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;

        let spread_sum: f64 = bars.iter().map(|b| b.spread).sum();
        let max_spread = bars.iter().map(|b| b.spread).fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            first: first.timestamp,
            last: last.timestamp,
            bars: bars.len(),
            filled_bars: bars.iter().filter(|b| b.is_filled()).count(),
            mean_spread_pips: spread_sum / bars.len() as f64 * PIP_FACTOR,
            max_spread_pips: max_spread * PIP_FACTOR,
            flat_bars: bars.iter().filter(|b| b.is_flat()).count(),
        })
    }

    /// Percentage of flat bars.
    #[must_use]
    pub fn flat_pct(&self) -> f64 {
        100.0 * self.flat_bars as f64 / self.bars as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};

    fn bar(minute: i64, high: f64, low: f64, spread: f64) -> Ohlcv {
        Ohlcv {
            timestamp: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap() + TimeDelta::minutes(minute),
            open: low,
            high,
            low,
            close: high,
            bid: low,
            ask: high,
            spread,
            volume: 1.0,
            tick_count: 1,
        }
    }

    #[test]
    fn test_empty() {
        assert!(QualityReport::from_bars(&[]).is_none());
    }

    #[test]
    fn test_report() {
        let bars = [
            bar(0, 1.1002, 1.1000, 0.0001),
            bar(1, 1.1000, 1.1000, 0.0003),
            bar(2, 1.1004, 1.1001, 0.0002),
            bar(3, 1.1001, 1.1001, 0.0002),
        ];
        let report = QualityReport::from_bars(&bars).unwrap();

        assert_eq!(report.bars, 4);
        assert_eq!(report.first, bars[0].timestamp);
        assert_eq!(report.last, bars[3].timestamp);
        assert_relative_eq!(report.mean_spread_pips, 2.0, epsilon = 1e-9);
        assert_relative_eq!(report.max_spread_pips, 3.0, epsilon = 1e-9);
        assert_eq!(report.flat_bars, 2);
        assert_relative_eq!(report.flat_pct(), 50.0);
        assert_eq!(report.filled_bars, 0);
    }
}
