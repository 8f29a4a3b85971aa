//! tickbars CLI - Dukascopy ticks to gap-filled bar CSVs.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickbars_lib::Timeframe;

mod commands;
mod display;
mod logging;

#[derive(Parser)]
#[command(name = "tickbars")]
#[command(about = "Download Dukascopy ticks and resample them into gap-filled bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v for debug logs)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Download tuning shared by `download` and `bulk`.
#[derive(clap::Args, Clone, Copy)]
struct FetchArgs {
    /// Bar timeframe (1s, 1min, 5min, 15min, 30min, 1h, 4h, 1d)
    #[arg(long, default_value = "1min")]
    timeframe: Timeframe,

    /// Skip the raw tick Parquet file written next to the CSV
    #[arg(long)]
    no_ticks: bool,

    /// Total attempts per hour file before it is skipped
    #[arg(long, default_value = "10")]
    max_attempts: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a date range into one bar CSV
    Download {
        /// Instrument symbol (e.g., EURUSD, XAUUSD)
        #[arg(long, default_value = "EURUSD")]
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long, default_value = "2022-01-01")]
        start: String,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long, default_value = "2023-12-31")]
        end: String,

        /// Output CSV path
        #[arg(long, default_value = "data/EURUSD_dukascopy.csv")]
        output: PathBuf,

        /// Concurrent hour downloads
        #[arg(long, default_value = "8")]
        workers: usize,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Download whole years, one CSV per year, pausing between years
    Bulk {
        /// Instrument symbol
        #[arg(long, default_value = "XAUUSD")]
        symbol: String,

        /// First year
        #[arg(long, default_value = "2010")]
        from_year: i32,

        /// Last year, inclusive
        #[arg(long, default_value = "2015")]
        to_year: i32,

        /// Directory for <SYMBOL>_<YEAR>.csv files
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,

        /// Concurrent hour downloads
        #[arg(long, default_value = "6")]
        workers: usize,

        /// Minimum pause between years in seconds
        #[arg(long, default_value = "60")]
        min_pause: u64,

        /// Maximum pause between years in seconds
        #[arg(long, default_value = "120")]
        max_pause: u64,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Render a bar CSV as an HTML chart with EMA50 and EMA200
    Plot {
        /// Bar CSV file
        #[arg(long)]
        data: PathBuf,
    },

    /// List supported instruments
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Download {
            symbol,
            start,
            end,
            output,
            workers,
            fetch,
        } => {
            let job = commands::download::DownloadJob::new(&symbol, &start, &end, output, fetch)?;
            let client = commands::download::build_client(workers, fetch)?;
            commands::download::download(&client, &job, cli.quiet).await
        }
        Commands::Bulk {
            symbol,
            from_year,
            to_year,
            output_dir,
            workers,
            min_pause,
            max_pause,
            fetch,
        } => {
            let plan = commands::bulk::BulkPlan {
                symbol,
                from_year,
                to_year,
                output_dir,
                min_pause,
                max_pause,
            };
            let client = commands::download::build_client(workers, fetch)?;
            commands::bulk::bulk(&client, &plan, fetch, cli.quiet).await
        }
        Commands::Plot { data } => commands::plot::plot(&data),
        Commands::List => {
            commands::list::list_instruments();
            Ok(())
        }
    }
}
