//! Shared constants for placescrape
//!
//! Selectors, thresholds and default locations used by both pipelines.
//! Google Maps class names are obfuscated and change between layout
//! versions, so every selector lives here rather than inline.

// =============================================================================
// Browser
// =============================================================================

/// Chrome user agent string sent by the automated session
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Fixed viewport width for every session
pub const WINDOW_WIDTH: u32 = 1920;

/// Fixed viewport height for every session
pub const WINDOW_HEIGHT: u32 = 1080;

/// Timeout for `page.goto()` in seconds
pub const NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Consent buttons across the locales we see in practice.
pub const CONSENT_BUTTON_XPATH: &str = "//button[contains(., 'Accept all') or contains(., 'I agree') or contains(., 'Прийняти всі')]";

/// How long to look for a consent button before assuming there is none
pub const CONSENT_WAIT_SECS: u64 = 5;

/// Pause after clicking consent so the overlay can disappear
pub const CONSENT_SETTLE_MS: u64 = 2000;

/// Pause after navigation before any extraction starts
pub const PAGE_SETTLE_MS: u64 = 2000;

// =============================================================================
// Place info
// =============================================================================

/// Primary place heading
pub const HEADING_SELECTOR: &str = "h1.DUwDvf";

/// How long to wait for the primary heading to render (seconds)
pub const HEADING_WAIT_SECS: u64 = 10;

/// Category chip under the heading
pub const CATEGORY_SELECTOR: &str = "button.DkEaL";

/// Address selectors, most specific first
pub const ADDRESS_SELECTORS: [&str; 3] = [
    "button[data-item-id='address']",
    "span.UsdlK",
    "div.LrzXr",
];

pub const OG_TITLE_SELECTOR: &str = "meta[property='og:title']";
pub const OG_IMAGE_SELECTOR: &str = "meta[property='og:image']";
pub const CANONICAL_SELECTOR: &str = "link[rel='canonical']";

/// Separator between place name and the rest of an Open Graph title
pub const OG_TITLE_SEPARATOR: &str = " · ";

// =============================================================================
// Reviews
// =============================================================================

/// Reviews tab candidates. Text-based XPath for both locales first, then
/// attribute-based CSS that survives label changes.
pub const REVIEW_TAB_XPATHS: [&str; 4] = [
    "//button[contains(., 'Відгуки')]",
    "//button[contains(., 'Reviews')]",
    "//button[contains(., 'All reviews')]",
    "//button[@aria-label='All reviews']",
];

/// Every `aria-label` candidate in one selector so they share a single wait
pub const REVIEW_TAB_CSS: &str = "button[aria-label*='Відгуки'], button[aria-label*='Reviews'], \
     div[aria-label*='Відгуки'], div[aria-label*='Reviews']";

/// Container that appears once the reviews panel is open
pub const REVIEW_PANEL_SELECTOR: &str = "div.m6QErb";

/// Full class chain of the scrollable reviews list
pub const REVIEW_SCROLL_SELECTOR: &str = "div.m6QErb.DxyBCb.kA9KIf.dS8AEf.XiKgde";

/// A single review card
pub const REVIEW_CARD_SELECTOR: &str = "div.jftiEf";

pub const REVIEW_AUTHOR_SELECTORS: [&str; 2] = ["div.d4r55", "span.X5PpBb"];
pub const REVIEW_DATE_SELECTOR: &str = "span.rsqaWe";
pub const REVIEW_READ_MORE_SELECTOR: &str = "button.LkLjZd.ScJHi.OzU4dc";
pub const REVIEW_TEXT_SELECTOR: &str = "span.wiI7pd";

/// Per-locale star rating labels (en, uk, uk/ru, ru, es)
pub const RATING_SELECTORS: [&str; 6] = [
    "span[aria-label*='stars']",
    "span[aria-label*='Rated']",
    "span[aria-label*='Оцінка']",
    "span[aria-label*='рейтинг']",
    "span[aria-label*='зв']",
    "span[aria-label*='estrellas']",
];

/// Last resort for ratings rendered as an image with a label
pub const RATING_IMG_SELECTOR: &str = "[role='img'][aria-label]";

/// Lowercased fragments that mark an image label as a rating
pub const RATING_KEYWORDS: [&str; 5] = ["star", "зір", "звезд", "оцінк", "rate"];

/// Minimum number of characters (exclusive) for review text to be kept
pub const MIN_REVIEW_CONTENT_CHARS: usize = 5;

/// Default number of reviews per place
pub const DEFAULT_MAX_REVIEWS: usize = 30;

/// Sentinel used for dates that cannot be resolved
pub const UNKNOWN_DATE: &str = "Unknown";

/// Sentinel used for city and organization when they cannot be derived
pub const UNKNOWN: &str = "Unknown";

/// Default combined review output
pub const DEFAULT_REVIEWS_OUTPUT: &str = "all_reviews/all_reviews_combined.json";

// =============================================================================
// Places API
// =============================================================================

pub const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";

/// Fields requested from place details
pub const DETAILS_FIELDS: &str = "address_components,name,url";

/// Canonical place link prefix; the place id is appended.
pub const PLACE_LINK_PREFIX: &str = "https://www.google.com/maps/place/?q=place_id:";

/// Default output of link discovery
pub const DEFAULT_LINKS_OUTPUT: &str = "kyiv_gov_links_only.txt";

/// Environment variable holding the Places API key
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Short-link hosts that must be expanded before navigation
pub const SHORT_LINK_MARKERS: [&str; 3] = ["goo.gl", "g.co", "maps.app.goo.gl"];

/// Marker an expanded URL must contain to be treated as a maps page
pub const MAPS_URL_MARKER: &str = "google.com/maps";
