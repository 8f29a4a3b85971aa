//! Download command implementation.
//!
//! Fetches every hour of a date range, resamples the ticks into forward
//! filled bars and writes them as CSV, with an optional Parquet tick sidecar.

use crate::FetchArgs;
use crate::display::{ensure_parent_dir, hour_progress, log_quality, tick_sidecar_path, write_bars};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tickbars_lib::prelude::*;

/// One symbol and range to turn into a bar file.
#[derive(Debug)]
pub(crate) struct DownloadJob {
    pub(crate) instrument: &'static Instrument,
    pub(crate) range: DateRange,
    pub(crate) output: PathBuf,
    pub(crate) timeframe: Timeframe,
    pub(crate) write_ticks: bool,
}

impl DownloadJob {
    /// Resolves the symbol and parses the `YYYY-MM-DD` bounds.
    pub(crate) fn new(
        symbol: &str,
        start: &str,
        end: &str,
        output: PathBuf,
        fetch: FetchArgs,
    ) -> Result<Self> {
        Ok(Self {
            instrument: InstrumentRegistry::global().require(symbol)?,
            range: DateRange::parse(start, end)?,
            output,
            timeframe: fetch.timeframe,
            write_ticks: !fetch.no_ticks,
        })
    }
}

/// Builds the shared HTTP client from the command line flags.
pub(crate) fn build_client(workers: usize, fetch: FetchArgs) -> Result<DownloadClient> {
    let config = ClientConfig {
        concurrency: workers.max(1),
        max_attempts: fetch.max_attempts.max(1),
        timeout: Duration::from_secs(fetch.timeout),
        ..Default::default()
    };
    DownloadClient::new(config).context("Failed to build HTTP client")
}

/// Runs one download job end to end.
pub(crate) async fn download(client: &DownloadClient, job: &DownloadJob, quiet: bool) -> Result<()> {
    let instrument = job.instrument;
    tracing::info!(
        "Downloading {} {} ({} hours, {} workers)",
        instrument.id(),
        job.range,
        job.range.total_hours(),
        client.config().concurrency
    );

    ensure_parent_dir(&job.output)?;

    let progress = hour_progress(
        job.range.total_hours(),
        format!("{} {}", instrument.id(), job.range),
        quiet,
    );
    let summary = download_ticks(client, instrument, job.range, |_| progress.inc(1)).await;

    let finish_msg = if summary.skipped_hours > 0 {
        format!(
            "Downloaded {} ticks ({} hours skipped due to errors)",
            summary.ticks.len(),
            summary.skipped_hours
        )
    } else {
        format!("Downloaded {} ticks", summary.ticks.len())
    };
    progress.finish_with_message(finish_msg);

    if summary.ticks.is_empty() {
        return Err(TickbarsError::NoDataAvailable {
            instrument: instrument.id().to_string(),
        }
        .into());
    }
    tracing::info!(
        ticks = summary.ticks.len(),
        empty_hours = summary.empty_hours,
        skipped_hours = summary.skipped_hours,
        "Download finished"
    );
    if summary.skipped_hours > 0 {
        tracing::warn!(
            "{} of {} hours failed after retries and are missing from the output",
            summary.skipped_hours,
            summary.hours
        );
    }

    let bars = resample(&summary.ticks, job.timeframe);
    if let Some(report) = QualityReport::from_bars(&bars) {
        log_quality(&report);
    }

    write_bars(&bars, &job.output)?;
    tracing::info!("Saved {} bars to {}", bars.len(), job.output.display());

    if job.write_ticks {
        write_ticks(&summary.ticks, &job.output)?;
    }

    Ok(())
}

#[cfg(feature = "parquet")]
fn write_ticks(ticks: &[Tick], output: &std::path::Path) -> Result<()> {
    let sidecar = tick_sidecar_path(output);
    crate::display::write_tick_sidecar(ticks, &sidecar)?;
    tracing::info!("Saved {} ticks to {}", ticks.len(), sidecar.display());
    Ok(())
}

#[cfg(not(feature = "parquet"))]
fn write_ticks(_ticks: &[Tick], output: &std::path::Path) -> Result<()> {
    tracing::warn!(
        "Parquet support not compiled in, skipping {}",
        tick_sidecar_path(output).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Cursor;

    fn fetch_args() -> FetchArgs {
        FetchArgs {
            timeframe: Timeframe::Minute5,
            no_ticks: true,
            max_attempts: 3,
            timeout: 5,
        }
    }

    #[test]
    fn test_job_new() {
        let job = DownloadJob::new(
            "xauusd",
            "2014-01-01",
            "2014-01-02",
            PathBuf::from("out.csv"),
            fetch_args(),
        )
        .unwrap();

        assert_eq!(job.instrument.id(), "XAUUSD");
        assert_eq!(job.range.total_hours(), 48);
        assert_eq!(job.timeframe, Timeframe::Minute5);
        assert!(!job.write_ticks);
    }

    #[test]
    fn test_job_rejects_bad_input() {
        let output = PathBuf::from("out.csv");
        assert!(DownloadJob::new("NOPE", "2014-01-01", "2014-01-02", output.clone(), fetch_args()).is_err());
        assert!(DownloadJob::new("EURUSD", "2014-02-01", "2014-01-02", output.clone(), fetch_args()).is_err());
        assert!(DownloadJob::new("EURUSD", "01/02/2014", "2014-01-02", output, fetch_args()).is_err());
    }

    #[test]
    fn test_build_client() {
        let client = build_client(0, fetch_args()).unwrap();
        assert_eq!(client.config().concurrency, 1);
        assert_eq!(client.config().max_attempts, 3);
        assert_eq!(client.config().timeout, Duration::from_secs(5));
    }

    fn bi5(records: &[(u32, u32, u32)]) -> Vec<u8> {
        let mut raw = Vec::new();
        for &(ms, ask, bid) in records {
            raw.extend(ms.to_be_bytes());
            raw.extend(ask.to_be_bytes());
            raw.extend(bid.to_be_bytes());
            raw.extend(1.5f32.to_be_bytes());
            raw.extend(2.0f32.to_be_bytes());
        }
        let mut out = Vec::new();
        lzma_rs::lzma_compress(&mut Cursor::new(raw), &mut out).unwrap();
        out
    }

    fn mock_client(server: &MockServer) -> DownloadClient {
        DownloadClient::new(ClientConfig {
            concurrency: 4,
            max_attempts: 1,
            base_url: server.base_url(),
            ..Default::default()
        })
        .unwrap()
    }

    fn job(output: PathBuf, write_ticks: bool) -> DownloadJob {
        DownloadJob {
            instrument: InstrumentRegistry::global().require("EURUSD").unwrap(),
            range: DateRange::parse("2014-01-06", "2014-01-06").unwrap(),
            output,
            timeframe: Timeframe::Minute1,
            write_ticks,
        }
    }

    #[tokio::test]
    async fn test_download_writes_csv_and_tick_sidecar() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/EURUSD/2014/00/06/10h_ticks.bi5");
                then.status(200)
                    .body(bi5(&[(1_000, 137_012, 137_000), (61_000, 137_022, 137_010)]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/EURUSD.csv");
        download(&mock_client(&server), &job(output.clone(), true), true)
            .await
            .unwrap();

        let csv = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "timestamp,open,high,low,close,bid,ask,spread,volume,tick_count"
        );
        // 10:00 and 10:01 from ticks, 10:02 carried up to the last tick's ceiling
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("2014-01-06 10:00:00,"));
        assert!(lines[3].starts_with("2014-01-06 10:02:00,"));
        assert!(lines[3].ends_with(",0,0"));
        #[cfg(feature = "parquet")]
        assert!(dir.path().join("nested/EURUSD.ticks.parquet").exists());
    }

    #[tokio::test]
    async fn test_download_without_ticks_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404);
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("EURUSD.csv");
        let err = download(&mock_client(&server), &job(output.clone(), false), true)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TickbarsError>(),
            Some(TickbarsError::NoDataAvailable { instrument }) if instrument == "EURUSD"
        ));
        assert!(!output.exists());
    }
}
