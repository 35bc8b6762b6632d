//! Places API link discovery
//!
//! Searches a grid of locations for government offices, courts and
//! universities, filters them by name and region, and writes the canonical
//! place links to a text file. The API key comes from the config file or
//! the `GOOGLE_MAPS_API_KEY` environment variable.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use placescrape::config::DiscoveryConfig;
use placescrape::init_logging;
use placescrape::places::{GooglePlacesClient, LinkDiscovery};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding the built-in grid, place types and filters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file for the links
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DiscoveryConfig::from_json_file(path)?,
        None => DiscoveryConfig::default(),
    };
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    let config = config.validate()?;

    let client = GooglePlacesClient::new(&config).context("Failed to create Places client")?;
    let mut discovery = LinkDiscovery::new(&client, &config);
    let stats = discovery.run().await.clone();

    discovery
        .write_links(&config.output_path)
        .await
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    info!(
        "Pages: {} (page-token retries: {}), candidates: {}, duplicates: {}, \
         keyword rejections: {}, details failures: {}, region rejections: {}, \
         accepted: {}, broken chains: {}",
        stats.pages_fetched,
        stats.page_token_retries,
        stats.candidates_seen,
        stats.duplicates_skipped,
        stats.keyword_rejections,
        stats.details_failures,
        stats.region_rejections,
        stats.accepted,
        stats.chain_errors
    );
    Ok(())
}
