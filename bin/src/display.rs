//! Progress display and output writing for the tickbars CLI.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tickbars_lib::prelude::*;

/// Creates the per-hour progress bar, hidden in quiet mode.
pub(crate) fn hour_progress(total_hours: usize, message: String, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_hours as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} hours ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_message(message);
    pb
}

/// Path of the raw tick sidecar for a bar CSV: `<stem>.ticks.parquet`.
pub(crate) fn tick_sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("ticks.parquet")
}

/// Creates the parent directory of `path` if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}

/// Writes bars as CSV.
pub(crate) fn write_bars(bars: &[Ohlcv], output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    CsvFormatter::new()
        .write_ohlcv(bars, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Writes raw ticks as Parquet.
#[cfg(feature = "parquet")]
pub(crate) fn write_tick_sidecar(ticks: &[Tick], output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    ParquetFormatter::new()
        .write_ticks(ticks, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Logs the quality summary of a bar series.
pub(crate) fn log_quality(report: &QualityReport) {
    tracing::info!(
        "Period: {} -> {}",
        report.first.format("%Y-%m-%d %H:%M:%S"),
        report.last.format("%Y-%m-%d %H:%M:%S")
    );
    tracing::info!(
        "Bars: {} ({} forward filled)",
        report.bars,
        report.filled_bars
    );
    tracing::info!(
        "Spread: mean {:.2} pips, max {:.2} pips",
        report.mean_spread_pips,
        report.max_spread_pips
    );
    tracing::info!(
        "Flat bars: {} ({:.2}%)",
        report.flat_bars,
        report.flat_pct()
    );
}
