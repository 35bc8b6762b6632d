//! Review crawler
//!
//! Usage: `placescrape <input_file_or_url> [max_reviews] [headless]`
//!
//! Visits each place URL in one browser session and appends its reviews to
//! the combined JSON file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use placescrape::config::ReviewCrawlConfig;
use placescrape::crawl::{ReviewCrawl, read_input_urls};
use placescrape::driver::BrowserSession;
use placescrape::init_logging;
use placescrape::reviews::ReviewStore;
use placescrape::utils::constants::{DEFAULT_MAX_REVIEWS, DEFAULT_REVIEWS_OUTPUT};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A place URL, or a `.txt` file with one URL per line
    input: String,

    /// Reviews to collect per place
    #[arg(default_value_t = DEFAULT_MAX_REVIEWS)]
    max_reviews: usize,

    /// Pass `false` to show the browser window
    #[arg(default_value = "true")]
    headless: String,

    /// Combined review output, appended to if it exists
    #[arg(short, long, default_value = DEFAULT_REVIEWS_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let headless = !cli.headless.eq_ignore_ascii_case("false");
    let config = ReviewCrawlConfig::default()
        .with_max_reviews(cli.max_reviews)
        .with_headless(headless)
        .with_output_path(cli.output);

    let urls = read_input_urls(&cli.input)
        .await
        .with_context(|| format!("Failed to read URL list {}", cli.input))?;
    if urls.is_empty() {
        warn!("No URLs to crawl in {}", cli.input);
    }

    let mut store = ReviewStore::load(&config.output_path)
        .await
        .context("Failed to load prior reviews")?;

    let session = BrowserSession::launch(config.headless)
        .await
        .context("Failed to start browser session")?;

    let summary = {
        let mut crawl = ReviewCrawl::new(&session, &config)?;
        crawl.run(&urls, &mut store).await
    };
    session.quit().await;

    store.save().await.context("Failed to save reviews")?;

    info!(
        "Crawled {} of {} places ({} skipped), {} new reviews",
        summary.places_crawled, summary.urls, summary.places_skipped, summary.reviews_collected
    );
    info!(
        "Saved all {} reviews to {}.",
        store.len(),
        store.path().display()
    );
    Ok(())
}
