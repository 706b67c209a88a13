//! # Mars Scrape CLI
//!
//! Runs one scrape and prints the resulting record as JSON on stdout. Logs go
//! to stderr and are controlled with `RUST_LOG`.
//!
//! ## Usage
//!
//! ```sh
//! RUST_LOG=mars_scrape=debug mars_scrape -o ./mars.json
//! ```

use clap::Parser;
use mars_scrape::outputs::json;
use mars_scrape::{ScrapeConfig, scrape_all_with};
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("mars_scrape starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => ScrapeConfig::load(path).await.inspect_err(|e| {
            error!(path = %path, error = %e, "Failed to load configuration");
        })?,
        None => ScrapeConfig::default(),
    };
    if args.visible {
        config.browser.headless = false;
    }
    if let Some(path) = &args.chrome_path {
        config.browser.chrome_path = Some(path.clone());
    }

    // ---- Scrape ----
    let record = scrape_all_with(&config).await.inspect_err(|e| {
        error!(error = %e, "Could not start the browser");
    })?;

    // ---- Output ----
    println!("{}", json::to_json(&record, args.compact)?);

    if let Some(path) = &args.output {
        json::write_record(&record, path, args.compact).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
