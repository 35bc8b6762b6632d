//! Grid walk over the Places API producing the deduplicated link set

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

use super::client::{NearbyRequest, PlacesApi};
use super::filters::{KeywordFilter, RegionFilter};
use super::paginator::Paginator;
use super::types::{NearbySearchResponse, PlaceSummary};
use crate::config::{DiscoveryConfig, GridPoint};
use crate::utils::place_link;

/// Per-stage counters of a discovery run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    pub pages_fetched: usize,
    pub page_token_retries: u32,
    /// Results carrying a place id
    pub candidates_seen: usize,
    pub duplicates_skipped: usize,
    pub keyword_rejections: usize,
    pub details_failures: usize,
    pub region_rejections: usize,
    pub accepted: usize,
    /// Pagination chains cut short by a transport or decoding error
    pub chain_errors: usize,
}

/// What happened to one search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    MissingId,
    Duplicate,
    ExcludedByKeyword(String),
    DetailsUnavailable,
    OutsideRegion,
    Accepted(String),
}

/// Link discovery state for one run
pub struct LinkDiscovery<'a, A: PlacesApi> {
    api: &'a A,
    config: &'a DiscoveryConfig,
    keyword_filter: KeywordFilter,
    region_filter: RegionFilter,
    seen_place_ids: HashSet<String>,
    links: BTreeSet<String>,
    stats: DiscoveryStats,
}

impl<'a, A: PlacesApi> LinkDiscovery<'a, A> {
    pub fn new(api: &'a A, config: &'a DiscoveryConfig) -> Self {
        Self {
            api,
            config,
            keyword_filter: KeywordFilter::new(&config.exclude_keywords),
            region_filter: RegionFilter::new(
                config.accepted_regions.iter().cloned(),
                config.accepted_cities.iter().cloned(),
            ),
            seen_place_ids: HashSet::new(),
            links: BTreeSet::new(),
            stats: DiscoveryStats::default(),
        }
    }

    /// Accepted links, sorted
    #[must_use]
    pub fn links(&self) -> &BTreeSet<String> {
        &self.links
    }

    #[must_use]
    pub fn stats(&self) -> &DiscoveryStats {
        &self.stats
    }

    /// Walk every (place type, location) cell of the grid.
    pub async fn run(&mut self) -> &DiscoveryStats {
        let api = self.api;
        let config = self.config;
        let mut paginator = Paginator::new(api, config.page_token_retry.clone());

        for place_type in &config.place_types {
            for location in &config.locations {
                self.walk_cell(&mut paginator, place_type, location).await;
            }
        }

        self.stats.page_token_retries = paginator.retries();
        info!(
            "Discovery finished: {} links accepted out of {} candidates",
            self.stats.accepted, self.stats.candidates_seen
        );
        &self.stats
    }

    /// Follow one pagination chain to its end.
    async fn walk_cell(
        &mut self,
        paginator: &mut Paginator<'a, A>,
        place_type: &str,
        location: &GridPoint,
    ) {
        info!(
            "Searching {} near {} ({})",
            place_type,
            location.label,
            location.as_param()
        );

        let initial = NearbyRequest::Initial {
            location,
            radius_m: self.config.radius_m,
            place_type,
        };
        let mut page = match paginator.fetch(&initial).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Nearby search for {} near {} failed: {}", place_type, location.label, e);
                self.stats.chain_errors += 1;
                return;
            }
        };

        loop {
            self.process_page(&page).await;

            let Some(token) = page.next_page_token().map(str::to_string) else {
                break;
            };
            page = match paginator.fetch(&NearbyRequest::Page { token: &token }).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Next page for {} near {} failed: {}", place_type, location.label, e);
                    self.stats.chain_errors += 1;
                    break;
                }
            };
        }
    }

    async fn process_page(&mut self, page: &NearbySearchResponse) {
        self.stats.pages_fetched += 1;
        for summary in &page.results {
            let outcome = self.process_candidate(summary).await;
            debug!("{:?}: {:?}", summary.name, outcome);
        }
    }

    /// Dedup, keyword filter, details lookup, region filter.
    ///
    /// The place id is marked as seen before any filtering so that a
    /// rejected place never costs a second details call.
    pub async fn process_candidate(&mut self, summary: &PlaceSummary) -> CandidateOutcome {
        let Some(place_id) = summary.place_id.as_deref().filter(|id| !id.is_empty()) else {
            return CandidateOutcome::MissingId;
        };

        if !self.seen_place_ids.insert(place_id.to_string()) {
            self.stats.duplicates_skipped += 1;
            return CandidateOutcome::Duplicate;
        }
        self.stats.candidates_seen += 1;

        let name = summary.name.as_deref().unwrap_or_default();
        if let Some(keyword) = self.keyword_filter.matching_keyword(name) {
            self.stats.keyword_rejections += 1;
            return CandidateOutcome::ExcludedByKeyword(keyword.to_string());
        }

        let details = match self.api.place_details(place_id).await {
            Ok(details) => details,
            Err(e) => {
                debug!("Details for {} unavailable: {}", place_id, e);
                self.stats.details_failures += 1;
                return CandidateOutcome::DetailsUnavailable;
            }
        };

        if !self.region_filter.accepts(&details.address_components) {
            self.stats.region_rejections += 1;
            return CandidateOutcome::OutsideRegion;
        }

        let link = place_link(place_id);
        self.links.insert(link.clone());
        self.stats.accepted += 1;
        CandidateOutcome::Accepted(link)
    }

    /// Write the links, sorted, one per line.
    pub async fn write_links(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut contents = String::new();
        for link in &self.links {
            contents.push_str(link);
            contents.push('\n');
        }
        tokio::fs::write(path, contents).await?;

        info!("Saved {} unique links to '{}'", self.links.len(), path.display());
        Ok(())
    }
}
