//! Concurrent per-hour tick download pipeline.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, StreamExt};
use tickbars_types::{DateRange, Instrument, Tick, TickbarsError};

use crate::{DownloadClient, DownloadError, decompress_bi5, parse_ticks, url::tick_url_with_base};

/// Ticks decoded from a single hour file.
#[derive(Debug, Clone)]
pub struct TickBatch {
    /// The hour start timestamp.
    pub hour: DateTime<Utc>,
    /// The ticks in this batch.
    pub ticks: Vec<Tick>,
    /// Whether this hour failed and was skipped.
    pub had_error: bool,
}

impl TickBatch {
    /// Creates a new tick batch.
    #[must_use]
    pub const fn new(hour: DateTime<Utc>, ticks: Vec<Tick>) -> Self {
        Self {
            hour,
            ticks,
            had_error: false,
        }
    }

    /// Creates an empty batch standing in for a failed hour.
    #[must_use]
    pub const fn skipped_error(hour: DateTime<Utc>) -> Self {
        Self {
            hour,
            ticks: Vec::new(),
            had_error: true,
        }
    }

    /// Returns true if the batch is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns the number of ticks in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Returns true if this batch had an error that was skipped.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }
}

/// Creates a stream of tick batches for every hour of `range`.
///
/// Up to `concurrency` hours are in flight at once and batches are yielded in
/// completion order, not chronological order.
pub fn tick_stream<'a>(
    client: &'a DownloadClient,
    instrument: &'a Instrument,
    range: DateRange,
) -> impl Stream<Item = Result<TickBatch, TickbarsError>> + 'a {
    let decimal_factor = instrument.decimal_factor();
    let concurrency = client.config().concurrency.max(1);

    stream::iter(range.hours())
        .map(move |hour| {
            let url = tick_url_with_base(&client.config().base_url, instrument.id(), hour);
            async move {
                let result = client.download(&url).await;
                decode_hour(hour, result, decimal_factor).await
            }
        })
        .buffer_unordered(concurrency)
}

/// Like [`tick_stream`], but a failed hour becomes an empty batch with
/// `had_error` set instead of an error item.
///
/// Long multi-year downloads should not be aborted by one bad hour.
pub fn tick_stream_resilient<'a>(
    client: &'a DownloadClient,
    instrument: &'a Instrument,
    range: DateRange,
) -> impl Stream<Item = TickBatch> + 'a {
    let decimal_factor = instrument.decimal_factor();
    let concurrency = client.config().concurrency.max(1);

    stream::iter(range.hours())
        .map(move |hour| {
            let url = tick_url_with_base(&client.config().base_url, instrument.id(), hour);
            async move {
                let result = client.download(&url).await;
                match decode_hour(hour, result, decimal_factor).await {
                    Ok(batch) => batch,
                    Err(e) => {
                        tracing::warn!(%hour, "skipping hour: {e}");
                        TickBatch::skipped_error(hour)
                    }
                }
            }
        })
        .buffer_unordered(concurrency)
}

/// Turns a download result into a tick batch.
///
/// LZMA decompression is offloaded to the blocking thread pool.
async fn decode_hour(
    hour: DateTime<Utc>,
    result: Result<Option<Bytes>, DownloadError>,
    decimal_factor: f64,
) -> Result<TickBatch, TickbarsError> {
    let compressed = match result {
        Ok(Some(compressed)) => compressed,
        Ok(None) => return Ok(TickBatch::new(hour, Vec::new())),
        Err(e) => return Err(TickbarsError::Http(e.to_string())),
    };

    let decompressed = tokio::task::spawn_blocking(move || decompress_bi5(&compressed))
        .await
        .map_err(|e| TickbarsError::Decompress(format!("spawn_blocking failed: {e}")))?
        .map_err(|e| TickbarsError::Decompress(e.to_string()))?;

    let ticks = parse_ticks(&decompressed)
        .map(|raw| raw.normalize(hour, decimal_factor))
        .collect();

    Ok(TickBatch::new(hour, ticks))
}

/// Ticks gathered for a whole range, sorted by time.
#[derive(Debug, Clone, Default)]
pub struct DownloadSummary {
    /// All ticks in ascending timestamp order.
    pub ticks: Vec<Tick>,
    /// Number of hours requested.
    pub hours: usize,
    /// Hours that held no ticks (weekends, holidays).
    pub empty_hours: usize,
    /// Hours that failed after all retries.
    pub skipped_hours: usize,
}

/// Downloads every hour of `range` through [`tick_stream_resilient`] and
/// collects the ticks in chronological order.
///
/// `on_batch` is called once per completed hour, e.g. to drive a progress bar.
pub async fn download_ticks(
    client: &DownloadClient,
    instrument: &Instrument,
    range: DateRange,
    mut on_batch: impl FnMut(&TickBatch),
) -> DownloadSummary {
    let mut summary = DownloadSummary {
        hours: range.total_hours(),
        ..Default::default()
    };

    let mut batches = std::pin::pin!(tick_stream_resilient(client, instrument, range));
    while let Some(batch) = batches.next().await {
        on_batch(&batch);
        if batch.had_error() {
            summary.skipped_hours += 1;
        } else if batch.is_empty() {
            summary.empty_hours += 1;
        }
        summary.ticks.extend(batch.ticks);
    }

    summary.ticks.sort_by_key(|t| t.timestamp);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use crate::parse::encode_tick;
    use chrono::{NaiveDate, TimeZone};
    use httpmock::prelude::*;
    use std::io::Cursor;
    use std::time::Duration;
    use tickbars_types::Category;

    fn compress(raw: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        lzma_rs::lzma_compress(&mut Cursor::new(raw), &mut out).unwrap();
        out
    }

    fn test_client(base_url: String) -> DownloadClient {
        DownloadClient::new(ClientConfig {
            concurrency: 4,
            max_attempts: 2,
            base_delay: Duration::ZERO,
            jitter: Duration::ZERO,
            throttle_penalty: Duration::ZERO,
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_tick_batch_new() {
        let batch = TickBatch::new(Utc::now(), vec![]);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
        assert!(!batch.had_error());
        assert!(TickBatch::skipped_error(Utc::now()).had_error());
    }

    #[tokio::test]
    async fn test_download_ticks_mixed_hours() {
        let server = MockServer::start_async().await;

        // 01h holds two ticks written out of order on purpose
        let mut raw = encode_tick(90_000, 108_012, 108_010, 1.0, 2.0);
        raw.extend(encode_tick(1_500, 108_002, 108_000, 0.5, 0.5));
        let hour_one = server
            .mock_async(|when, then| {
                when.method(GET).path("/USDJPY/2024/00/02/01h_ticks.bi5");
                then.status(200).body(compress(&raw));
            })
            .await;
        // 02h exists but is empty
        server
            .mock_async(|when, then| {
                when.method(GET).path("/USDJPY/2024/00/02/02h_ticks.bi5");
                then.status(200).body(Vec::<u8>::new());
            })
            .await;
        // 03h is corrupt
        server
            .mock_async(|when, then| {
                when.method(GET).path("/USDJPY/2024/00/02/03h_ticks.bi5");
                then.status(200).body([0xde, 0xad, 0xbe, 0xef]);
            })
            .await;
        // 04h keeps failing
        let failing = server
            .mock_async(|when, then| {
                when.method(GET).path("/USDJPY/2024/00/02/04h_ticks.bi5");
                then.status(500);
            })
            .await;
        // Everything else is missing
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404);
            })
            .await;

        let client = test_client(server.base_url());
        let instrument = Instrument::new("USDJPY", "USD/JPY", "", Category::Forex, 3);
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let mut seen = 0;
        let summary =
            download_ticks(&client, &instrument, DateRange::single_day(day), |_| seen += 1).await;

        assert_eq!(seen, 24);
        assert_eq!(summary.hours, 24);
        assert_eq!(summary.skipped_hours, 2);
        assert_eq!(summary.empty_hours, 21);
        assert_eq!(summary.ticks.len(), 2);

        let hour = Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap();
        assert_eq!(summary.ticks[0].timestamp, hour + chrono::TimeDelta::milliseconds(1_500));
        assert!((summary.ticks[0].bid - 108.0).abs() < 1e-9);
        assert!((summary.ticks[1].ask - 108.012).abs() < 1e-9);

        hour_one.assert_hits_async(1).await;
        failing.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_strict_stream_surfaces_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(502);
            })
            .await;

        let client = test_client(server.base_url());
        let instrument = Instrument::new("EURUSD", "EUR/USD", "", Category::Forex, 5);
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let results: Vec<_> = tick_stream(&client, &instrument, DateRange::single_day(day))
            .collect()
            .await;

        assert_eq!(results.len(), 24);
        assert!(results.iter().all(|r| matches!(r, Err(TickbarsError::Http(_)))));
    }
}
