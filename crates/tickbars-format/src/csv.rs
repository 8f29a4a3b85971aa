//! CSV output format.

use std::io::Write;
use tickbars_aggregate::Ohlcv;
use tickbars_types::Tick;

use crate::{FormatError, Formatter};

/// Timestamp layout used for bar rows.
pub(crate) const BAR_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

impl Formatter for CsvFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[Tick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "timestamp{d}ask{d}bid{d}ask_volume{d}bid_volume")?;
        }

        for tick in ticks {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}",
                tick.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                tick.ask,
                tick.bid,
                tick.ask_volume,
                tick.bid_volume
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_ohlcv<W: Write + Send>(
        &self,
        bars: &[Ohlcv],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "timestamp{d}open{d}high{d}low{d}close{d}bid{d}ask{d}spread{d}volume{d}tick_count"
            )?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.timestamp.format(BAR_TIMESTAMP_FORMAT),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.bid,
                bar.ask,
                bar.spread,
                bar.volume,
                bar.tick_count
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_bar() -> Ohlcv {
        Ohlcv {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap(),
            open: 1.1,
            high: 1.2,
            low: 1.05,
            close: 1.15,
            bid: 1.149,
            ask: 1.151,
            spread: 0.002,
            volume: 3.5,
            tick_count: 7,
        }
    }

    #[test]
    fn test_csv_bars() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_ohlcv(&[create_test_bar()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines,
            [
                "timestamp,open,high,low,close,bid,ask,spread,volume,tick_count",
                "2024-01-15 12:30:00,1.1,1.2,1.05,1.15,1.149,1.151,0.002,3.5,7",
            ]
        );
    }

    #[test]
    fn test_csv_ticks() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap();
        let ticks = [Tick::new(timestamp, 1.1001, 1.1, 1.0, 2.0)];
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new().write_ticks(&ticks, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("timestamp,ask,bid,ask_volume,bid_volume\n"));
        assert!(result.contains("2024-01-15 12:30:45.000,1.1001,1.1,1,2"));
    }

    #[test]
    fn test_tsv_no_header() {
        let formatter = CsvFormatter::new().with_delimiter('\t').with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter.write_ohlcv(&[create_test_bar()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("timestamp"));
        assert!(result.starts_with("2024-01-15 12:30:00\t1.1\t"));
    }
}
