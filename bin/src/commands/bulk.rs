//! Bulk command implementation.
//!
//! Downloads one file per calendar year, sequentially, with a random pause
//! between successful years to stay friendly with the datafeed.

use crate::FetchArgs;
use crate::commands::download::{DownloadJob, download};
use anyhow::{Result, bail};
use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tickbars_lib::prelude::*;

/// Years to download and where to put them.
#[derive(Debug)]
pub(crate) struct BulkPlan {
    pub(crate) symbol: String,
    pub(crate) from_year: i32,
    pub(crate) to_year: i32,
    pub(crate) output_dir: PathBuf,
    pub(crate) min_pause: u64,
    pub(crate) max_pause: u64,
}

impl BulkPlan {
    fn validate(&self) -> Result<()> {
        if self.from_year > self.to_year {
            bail!(
                "--from-year {} is after --to-year {}",
                self.from_year,
                self.to_year
            );
        }
        if self.min_pause > self.max_pause {
            bail!(
                "--min-pause {} is larger than --max-pause {}",
                self.min_pause,
                self.max_pause
            );
        }
        Ok(())
    }

    /// Output file for one year: `<dir>/<SYMBOL>_<YEAR>.csv`.
    fn year_output(&self, instrument: &Instrument, year: i32) -> PathBuf {
        year_output(&self.output_dir, instrument.id(), year)
    }
}

fn year_output(dir: &Path, symbol: &str, year: i32) -> PathBuf {
    dir.join(format!("{symbol}_{year}.csv"))
}

/// Picks a whole number of seconds in `[min, max]`.
fn random_pause(min: u64, max: u64) -> Duration {
    Duration::from_secs(rand::rng().random_range(min..=max))
}

/// Years that were saved or failed, and how many pauses were taken.
#[derive(Debug, Default, PartialEq, Eq)]
struct BulkOutcome {
    saved: Vec<i32>,
    failed: Vec<i32>,
    pauses: usize,
}

/// Runs `fetch_year` for every year of the plan in order.
///
/// A failed year is logged and skipped without pausing; the last year is
/// never followed by a pause.
async fn run_years<F, Fut>(plan: &BulkPlan, mut fetch_year: F) -> BulkOutcome
where
    F: FnMut(i32) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut outcome = BulkOutcome::default();
    for year in plan.from_year..=plan.to_year {
        tracing::info!("=== {} {year} ===", plan.symbol);
        if let Err(e) = fetch_year(year).await {
            tracing::error!("{} {year} failed: {e:#}", plan.symbol);
            outcome.failed.push(year);
            continue;
        }
        outcome.saved.push(year);

        if year < plan.to_year {
            let pause = random_pause(plan.min_pause, plan.max_pause);
            tracing::info!("Sleeping {}s before the next year", pause.as_secs());
            tokio::time::sleep(pause).await;
            outcome.pauses += 1;
        }
    }
    outcome
}

/// Downloads every year of the plan, one file per year.
///
/// Fails only when no year succeeded.
pub(crate) async fn bulk(
    client: &DownloadClient,
    plan: &BulkPlan,
    fetch: FetchArgs,
    quiet: bool,
) -> Result<()> {
    plan.validate()?;
    let instrument = InstrumentRegistry::global().require(&plan.symbol)?;

    let outcome = run_years(plan, |year| async move {
        let job = DownloadJob {
            instrument,
            range: DateRange::year(year)?,
            output: plan.year_output(instrument, year),
            timeframe: fetch.timeframe,
            write_ticks: !fetch.no_ticks,
        };
        download(client, &job, quiet).await
    })
    .await;

    if outcome.saved.is_empty() {
        bail!("All {} years failed for {}", outcome.failed.len(), instrument.id());
    }
    if !outcome.failed.is_empty() {
        tracing::warn!("Failed years: {:?}", outcome.failed);
    }
    tracing::info!(
        "{} of {} years saved to {}",
        outcome.saved.len(),
        outcome.saved.len() + outcome.failed.len(),
        plan.output_dir.display()
    );

    Ok(())
}
