//! URL helpers shared by both pipelines.

use super::constants::{MAPS_URL_MARKER, PLACE_LINK_PREFIX, SHORT_LINK_MARKERS};

/// Check if a URL is a navigable http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Whether the URL is one of Google's short-link forms that must be
/// expanded through a redirect before the browser can use it.
#[must_use]
pub fn is_short_link(url: &str) -> bool {
    SHORT_LINK_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Whether an (expanded) URL points at Google Maps
#[must_use]
pub fn is_maps_url(url: &str) -> bool {
    url.contains(MAPS_URL_MARKER)
}

/// Canonical maps link addressed by place id
#[must_use]
pub fn place_link(place_id: &str) -> String {
    format!("{PLACE_LINK_PREFIX}{place_id}")
}
