//! Command-line interface definitions for the Mars scraper.
//!
//! Every option can also come from an environment variable, so the scraper
//! can run unattended from a container or a cron-like wrapper.

use clap::Parser;

/// Scrape Mars news, the featured image, the facts table, and hemisphere
/// images, and print the combined record as JSON.
///
/// # Examples
///
/// ```sh
/// # Headless run, JSON on stdout
/// mars_scrape
///
/// # Watch the browser and keep a copy of the record
/// mars_scrape --visible -o ./data/mars.json
///
/// # Point at a redesigned site without a rebuild
/// mars_scrape -c ./sites.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// YAML file overriding target URLs, selectors, and waits
    #[arg(short, long, env = "MARS_SCRAPE_CONFIG")]
    pub config: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub visible: bool,

    /// Chrome/Chromium binary to launch (auto-detected when omitted)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<String>,

    /// Also write the record to this JSON file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}
