//! # AIP Charts
//!
//! Scrapes a national Aeronautical Information Publication website for the
//! chart PDFs of every aerodrome and heliport it lists, and writes a JSON
//! manifest a chart-viewer app can import.
//!
//! ## Usage
//!
//! ```sh
//! aip_charts --region UK
//! aip_charts --region FR --previous --codesort
//! ```
//!
//! ## Architecture
//!
//! 1. **Cycle**: resolve the AIRAC cycle for today (or the previous one)
//!    from the built-in schedule table and derive the region's base URL
//! 2. **Index**: fetch the region's index page and list its aerodromes
//! 3. **Charts**: fetch each aerodrome's page in turn and collect its charts
//! 4. **Output**: write `AIP {Region}.json` to the output directory

use chrono::Local;
use clap::Parser;
use std::fs::File;
use std::process;
use std::sync::Mutex;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod error;
mod fetch;
mod macros;
mod models;
mod outputs;
mod pipeline;
mod regions;
mod schedule;
mod scrapers;
mod utils;

use cli::Cli;
use error::AipError;
use fetch::Fetcher;
use outputs::json;
use regions::Region;
use schedule::AIRAC_SCHEDULE;
use utils::ensure_writable_dir;

/// File and console logging. The file is truncated on every run.
fn init_tracing(log_file: &str, debug: bool) -> Result<(), AipError> {
    let level = if debug { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let file = File::create(log_file)
        .map_err(|e| AipError::Logging(format!("cannot create log file {}: {}", log_file, e)))?;

    let file_layer = tfmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(UtcTime::rfc_3339())
        .with_filter(level);

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    let console_layer = tfmt::layer()
        .without_time()
        .with_target(false)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| AipError::Logging(e.to_string()))
}

async fn run(args: &Cli) -> Result<(), AipError> {
    let region: Region = args.region.parse()?;
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    info!(
        %region,
        %today,
        previous = args.previous,
        sort_key = %args.sort_key(),
        "Processing region"
    );

    let cycle = schedule::resolve(&AIRAC_SCHEDULE, today, args.previous)?;
    info!(
        label = %cycle.label,
        published = %cycle.published,
        effective = %cycle.effective,
        "AIRAC schedule"
    );
    info!(upcoming = %cycle.upcoming, "Next AIRAC effective date");

    ensure_writable_dir(&args.output_dir).await?;

    let base_url = region.base_url(&cycle);
    debug!(%base_url, "Region base URL");
    let fetcher = Fetcher::new(&args.user_agent)?;
    let scraper = scrapers::for_region(region);
    let aggregator =
        pipeline::collect(&fetcher, scraper.as_ref(), &base_url, args.sort_key()).await?;

    let header = region.header(&cycle, today);
    let contents = json::render(&header, &aggregator)?;
    let path = json::write_manifest(&args.output_dir, &region.output_filename(), &contents).await?;
    info!(
        path = %path.display(),
        aerodromes = aggregator.charted(),
        "Wrote chart manifest"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    if let Err(e) = init_tracing(&args.log_file, args.debug) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let start_time = Instant::now();
    info!("Started");
    debug!(?args, "Parsed CLI arguments");

    if let Err(e) = run(&args).await {
        error!(error = %e, "Fatal error, stopping");
        process::exit(1);
    }

    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "Finished");
}
