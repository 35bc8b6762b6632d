//! Review crawler settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::constants::{
    DEFAULT_MAX_REVIEWS, DEFAULT_REVIEWS_OUTPUT, HEADING_WAIT_SECS, PAGE_SETTLE_MS,
};

/// Pacing and termination of the incremental review scroll.
///
/// The defaults were tuned by hand against live pages; there is no deeper
/// derivation behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Scroll-to-bottom pulses per round
    pub pulses_per_round: u32,

    /// Pause after each pulse
    pub pulse_pause_ms: u64,

    /// Stop after more than this many consecutive rounds without new cards
    pub stagnation_limit: u32,

    /// Hard cap on the whole scroll loop
    pub max_duration_secs: u64,

    /// How long to wait for the scrollable container (per selector)
    pub container_wait_secs: u64,

    /// Pause after expanding a truncated review
    pub read_more_pause_ms: u64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            pulses_per_round: 5,
            pulse_pause_ms: 200,
            stagnation_limit: 15,
            max_duration_secs: 300,
            container_wait_secs: 15,
            read_more_pause_ms: 100,
        }
    }
}

impl ScrollSettings {
    #[must_use]
    pub fn pulse_pause(&self) -> Duration {
        Duration::from_millis(self.pulse_pause_ms)
    }

    #[must_use]
    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.max_duration_secs)
    }

    #[must_use]
    pub fn container_wait(&self) -> Duration {
        Duration::from_secs(self.container_wait_secs)
    }

    #[must_use]
    pub fn read_more_pause(&self) -> Duration {
        Duration::from_millis(self.read_more_pause_ms)
    }
}

/// Timeouts for opening the reviews tab
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabSettings {
    /// How long each tab selector gets to appear
    pub selector_timeout_ms: u64,

    /// How long the panel gets to render after the click
    pub panel_timeout_ms: u64,

    pub poll_interval_ms: u64,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            selector_timeout_ms: 4000,
            panel_timeout_ms: 5000,
            poll_interval_ms: 200,
        }
    }
}

impl TabSettings {
    #[must_use]
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    #[must_use]
    pub fn panel_timeout(&self) -> Duration {
        Duration::from_millis(self.panel_timeout_ms)
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Configuration for a review crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewCrawlConfig {
    /// Reviews to keep per place
    pub max_reviews: usize,

    pub headless: bool,

    /// Combined JSON output, appended to across runs
    pub output_path: PathBuf,

    /// Pause after navigation and consent before extraction
    pub page_settle_ms: u64,

    /// How long to wait for the place heading
    pub heading_wait_ms: u64,

    /// Timeout for short-link expansion
    pub expand_timeout_secs: u64,

    pub tab: TabSettings,
    pub scroll: ScrollSettings,
}

impl Default for ReviewCrawlConfig {
    fn default() -> Self {
        Self {
            max_reviews: DEFAULT_MAX_REVIEWS,
            headless: true,
            output_path: PathBuf::from(DEFAULT_REVIEWS_OUTPUT),
            page_settle_ms: PAGE_SETTLE_MS,
            heading_wait_ms: HEADING_WAIT_SECS * 1000,
            expand_timeout_secs: 10,
            tab: TabSettings::default(),
            scroll: ScrollSettings::default(),
        }
    }
}

impl ReviewCrawlConfig {
    #[must_use]
    pub fn with_max_reviews(mut self, max_reviews: usize) -> Self {
        self.max_reviews = max_reviews;
        self
    }

    #[must_use]
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }

    #[must_use]
    pub fn heading_wait(&self) -> Duration {
        Duration::from_millis(self.heading_wait_ms)
    }

    #[must_use]
    pub fn expand_timeout(&self) -> Duration {
        Duration::from_secs(self.expand_timeout_secs)
    }
}
