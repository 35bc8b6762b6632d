//! Coordinate resolution from page URLs and meta tags

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::document::{Document, Locator, node_attribute};
use crate::utils::constants::{CANONICAL_SELECTOR, OG_IMAGE_SELECTOR};

/// `@lat,lng,` segment of a maps URL
static AT_COORDINATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(-?\d+\.\d+),(-?\d+\.\d+),").expect("Invalid coordinate regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Sources for the place location, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateStrategy {
    /// `@lat,lng,` in the current document URL
    PageUrl,
    /// `center=lat,lng` in the `og:image` static map URL
    OpenGraphImage,
    /// `@lat,lng,` in `<link rel="canonical">`
    CanonicalLink,
}

impl CoordinateStrategy {
    pub const ORDER: [CoordinateStrategy; 3] = [
        CoordinateStrategy::PageUrl,
        CoordinateStrategy::OpenGraphImage,
        CoordinateStrategy::CanonicalLink,
    ];

    pub async fn extract<D: Document>(self, doc: &D) -> Option<Coordinates> {
        match self {
            Self::PageUrl => {
                let url = doc.current_url().await.ok().flatten()?;
                parse_at_coordinates(&url)
            }
            Self::OpenGraphImage => {
                let image = meta_attribute(doc, OG_IMAGE_SELECTOR, "content").await?;
                parse_center_param(&image)
            }
            Self::CanonicalLink => {
                let href = meta_attribute(doc, CANONICAL_SELECTOR, "href").await?;
                parse_at_coordinates(&href)
            }
        }
    }
}

/// Resolve the place location, first strategy that parses wins.
pub async fn resolve_coordinates<D: Document>(doc: &D) -> Option<Coordinates> {
    for strategy in CoordinateStrategy::ORDER {
        if let Some(coords) = strategy.extract(doc).await {
            debug!(
                "Coordinates from {:?}: {}, {}",
                strategy, coords.lat, coords.lng
            );
            return Some(coords);
        }
    }
    debug!("No coordinates found");
    None
}

/// Parse the `@lat,lng,` pattern used in maps place URLs.
#[must_use]
pub fn parse_at_coordinates(url: &str) -> Option<Coordinates> {
    let caps = AT_COORDINATES.captures(url)?;
    let lat = caps.get(1)?.as_str().parse().ok()?;
    let lng = caps.get(2)?.as_str().parse().ok()?;
    Some(Coordinates { lat, lng })
}

/// Parse a percent-encoded `center=lat,lng` query parameter.
#[must_use]
pub fn parse_center_param(image_url: &str) -> Option<Coordinates> {
    let url = Url::parse(image_url).ok()?;
    let (_, center) = url.query_pairs().find(|(key, _)| key == "center")?;

    let parts: Vec<&str> = center.split(',').collect();
    if parts.len() != 2 {
        trace!("Unexpected center parameter: {}", center);
        return None;
    }

    let lat = parts[0].trim().parse().ok()?;
    let lng = parts[1].trim().parse().ok()?;
    Some(Coordinates { lat, lng })
}

async fn meta_attribute<D: Document>(doc: &D, css: &str, name: &str) -> Option<String> {
    let node = doc.find(&Locator::css(css)).await.ok().flatten()?;
    node_attribute(&node, name).await
}
