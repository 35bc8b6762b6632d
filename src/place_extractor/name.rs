//! Place name resolution
//!
//! The heading is the best source but Maps truncates long names with an
//! ellipsis, so the resolver keeps falling back until it finds an untruncated
//! candidate.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::document::{Document, Locator, Node, node_attribute};
use crate::utils::constants::{HEADING_SELECTOR, OG_TITLE_SELECTOR, OG_TITLE_SEPARATOR};
use crate::utils::{is_truncated, normalize_place_text};

/// " - Google Maps", " · Google Maps", " | Google Maps ..." title suffixes
static MAPS_TITLE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[·\-|]\s*Google Maps.*$").expect("Invalid title suffix regex")
});

/// Sources for the place name, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStrategy {
    /// Visible text of the primary heading
    HeadingText,
    /// `aria-label` of the primary heading
    HeadingLabel,
    /// `og:title` up to the first middle dot
    OpenGraphTitle,
    /// `<title>` without the "Google Maps" suffix
    DocumentTitle,
}

impl NameStrategy {
    pub const ORDER: [NameStrategy; 4] = [
        NameStrategy::HeadingText,
        NameStrategy::HeadingLabel,
        NameStrategy::OpenGraphTitle,
        NameStrategy::DocumentTitle,
    ];

    /// Run this strategy. `None` means "try the next one".
    pub async fn extract<D: Document>(self, doc: &D) -> Option<String> {
        let raw = match self {
            Self::HeadingText => {
                let heading = find_first(doc, HEADING_SELECTOR).await?;
                heading.text().await.ok().flatten()?
            }
            Self::HeadingLabel => {
                let heading = find_first(doc, HEADING_SELECTOR).await?;
                node_attribute(&heading, "aria-label").await?
            }
            Self::OpenGraphTitle => {
                let meta = find_first(doc, OG_TITLE_SELECTOR).await?;
                let content = normalize_place_text(&node_attribute(&meta, "content").await?);
                return non_empty(split_og_title(&content));
            }
            Self::DocumentTitle => {
                let title = normalize_place_text(&doc.title().await.ok().flatten()?);
                return non_empty(strip_maps_suffix(&title));
            }
        };

        if is_truncated(&raw) {
            trace!("{:?} candidate is truncated: {}", self, raw.trim());
            return None;
        }
        non_empty(normalize_place_text(&raw))
    }
}

/// Resolve the place name, first non-empty strategy wins.
///
/// Returns an empty string when every strategy misses.
pub async fn resolve_place_name<D: Document>(doc: &D) -> String {
    for strategy in NameStrategy::ORDER {
        if let Some(name) = strategy.extract(doc).await {
            debug!("Place name from {:?}: {}", strategy, name);
            return name;
        }
    }
    debug!("No place name found");
    String::new()
}

/// First segment of an Open Graph title such as `Name · Address`
#[must_use]
pub fn split_og_title(title: &str) -> String {
    title
        .split(OG_TITLE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[must_use]
pub fn strip_maps_suffix(title: &str) -> String {
    MAPS_TITLE_SUFFIX.replace(title, "").trim().to_string()
}

async fn find_first<D: Document>(doc: &D, css: &str) -> Option<D::Node> {
    match doc.find(&Locator::css(css)).await {
        Ok(node) => node,
        Err(e) => {
            trace!("Lookup of '{}' failed: {}", css, e);
            None
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
