pub mod browser_setup;
pub mod config;
pub mod crawl;
pub mod document;
pub mod driver;
pub mod logging;
pub mod place_extractor;
pub mod places;
pub mod reviews;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ConfigError, DiscoveryConfig, ReviewCrawlConfig};
pub use crawl::{CrawlSummary, ReviewCrawl, read_input_urls};
pub use document::{Document, DocumentError, HtmlDocument, Locator, Node};
pub use driver::{BrowserSession, Navigator};
pub use logging::init_logging;
pub use place_extractor::{PlaceInfo, collect_place_info};
pub use places::{DiscoveryStats, GooglePlacesClient, LinkDiscovery, PlacesApi};
pub use reviews::{Review, ReviewStore};
