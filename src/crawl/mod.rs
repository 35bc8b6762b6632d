//! The review crawl over a list of place URLs
//!
//! One browser session serves every URL. A failure on one place (bad URL,
//! navigation error, no reviews tab, no review container) is logged and the
//! crawl moves on to the next URL; nothing short of a browser launch failure
//! ends the run.

pub mod expand;

pub use expand::{ExpandError, ShortLinkExpander};

use chrono::{Local, NaiveDate};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ReviewCrawlConfig;
use crate::document::DocumentError;
use crate::driver::Navigator;
use crate::place_extractor::{PlaceInfo, collect_place_info, resolve_place_name};
use crate::reviews::{
    Review, ReviewCollector, ReviewContext, ReviewStore, activate_reviews_tab,
};
use crate::utils::constants::UNKNOWN;
use crate::utils::{is_short_link, is_valid_url};

/// Why a place produced no reviews
#[derive(Debug, Error)]
pub enum PlaceSkip {
    #[error("Not a valid http(s) URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Expansion(#[from] ExpandError),

    #[error("Navigation failed: {0}")]
    Navigation(#[source] DocumentError),

    #[error("Reviews tab not found")]
    NoReviewsTab,

    #[error("Reviews container not found: {0}")]
    NoReviewContainer(#[source] DocumentError),
}

/// Counters reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub urls: usize,
    pub places_crawled: usize,
    pub places_skipped: usize,
    pub reviews_collected: usize,
}

/// City of a Maps address: the third segment from the end of
/// `street, house, city, region, postcode`-style addresses.
///
/// Falls back to `"Unknown"` only when there are fewer than three segments;
/// an empty segment in that position is returned as is.
#[must_use]
pub fn derive_city(address: &str) -> String {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return UNKNOWN.to_string();
    }
    parts[parts.len() - 3].to_string()
}

/// Expand the CLI input into URLs.
///
/// An argument ending in `.txt` is a file with one URL per line (blank lines
/// ignored); anything else is a single URL.
pub async fn read_input_urls(input: &str) -> std::io::Result<Vec<String>> {
    if !input.ends_with(".txt") {
        return Ok(vec![input.trim().to_string()]);
    }

    let raw = tokio::fs::read_to_string(Path::new(input)).await?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Review crawl state for one run
pub struct ReviewCrawl<'a, N: Navigator> {
    navigator: &'a N,
    config: &'a ReviewCrawlConfig,
    expander: ShortLinkExpander,
    today: NaiveDate,
    summary: CrawlSummary,
}

impl<'a, N: Navigator> ReviewCrawl<'a, N> {
    pub fn new(navigator: &'a N, config: &'a ReviewCrawlConfig) -> Result<Self, ExpandError> {
        Ok(Self {
            navigator,
            config,
            expander: ShortLinkExpander::new(config.expand_timeout())?,
            today: Local::now().date_naive(),
            summary: CrawlSummary::default(),
        })
    }

    /// Reference day for relative review dates
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Crawl every URL and append the reviews to `store`.
    ///
    /// Does not save the store; the caller does that once the browser is
    /// closed.
    pub async fn run(&mut self, urls: &[String], store: &mut ReviewStore) -> CrawlSummary {
        for (index, url) in urls.iter().enumerate() {
            let idx = index + 1;
            self.summary.urls += 1;

            match self.crawl_place(idx, url).await {
                Ok(reviews) => {
                    info!("Collected {} reviews from {}", reviews.len(), url);
                    self.summary.places_crawled += 1;
                    self.summary.reviews_collected += reviews.len();
                    store.extend(reviews);
                }
                Err(skip) => {
                    warn!("Skipping {}: {}", url, skip);
                    self.summary.places_skipped += 1;
                }
            }
        }

        self.summary.clone()
    }

    /// Run the full pipeline for one URL.
    pub async fn crawl_place(&self, idx: usize, url: &str) -> Result<Vec<Review>, PlaceSkip> {
        let url = self.resolve_url(url).await?;

        self.navigator
            .open(&url)
            .await
            .map_err(PlaceSkip::Navigation)?;
        self.navigator.dismiss_consent().await;
        tokio::time::sleep(self.config.page_settle()).await;

        let place = collect_place_info(self.navigator, self.config.heading_wait()).await;

        if !activate_reviews_tab(self.navigator, &self.config.tab).await {
            return Err(PlaceSkip::NoReviewsTab);
        }

        let context = self.review_context(&place).await;
        info!(
            "Organization #{}: {} ({}) [{:?}, {:?}]",
            idx, context.organization, context.city, context.lat, context.lng
        );

        let collector =
            ReviewCollector::new(&self.config.scroll, self.config.max_reviews, self.today);
        let cards = collector
            .collect(self.navigator)
            .await
            .map_err(PlaceSkip::NoReviewContainer)?;

        Ok(cards
            .into_iter()
            .map(|card| card.into_review(&context))
            .collect())
    }

    async fn resolve_url(&self, url: &str) -> Result<String, PlaceSkip> {
        let url = url.trim();
        let url = if is_short_link(url) {
            self.expander.expand(url).await?
        } else {
            url.to_string()
        };

        if is_valid_url(&url) {
            Ok(url)
        } else {
            Err(PlaceSkip::InvalidUrl(url))
        }
    }

    /// Organization falls back to a second name lookup now that the reviews
    /// panel is open, then to "Unknown".
    async fn review_context(&self, place: &PlaceInfo) -> ReviewContext {
        let organization = if place.name.is_empty() {
            let retry = resolve_place_name(self.navigator).await;
            if retry.is_empty() {
                UNKNOWN.to_string()
            } else {
                retry
            }
        } else {
            place.name.clone()
        };

        ReviewContext {
            city: derive_city(&place.address),
            organization,
            lat: place.lat(),
            lng: place.lng(),
        }
    }
}
