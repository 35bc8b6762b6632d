//! Place metadata from a loaded maps page
//!
//! Every field has its own fallback chain and degrades to empty (or unset
//! coordinates) independently. Nothing in here returns an error.

pub mod coordinates;
pub mod name;

pub use coordinates::{
    CoordinateStrategy, Coordinates, parse_at_coordinates, parse_center_param,
    resolve_coordinates,
};
pub use name::{NameStrategy, resolve_place_name};

use std::time::Duration;
use tracing::debug;

use crate::document::{Document, Locator, first_node_text, wait_for};
use crate::utils::constants::{ADDRESS_SELECTORS, CATEGORY_SELECTOR, HEADING_SELECTOR};

const HEADING_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What we know about the place behind a URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceInfo {
    pub name: String,
    pub category: String,
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl PlaceInfo {
    #[must_use]
    pub fn lat(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lat)
    }

    #[must_use]
    pub fn lng(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lng)
    }
}

/// Extract name, category, address and coordinates.
///
/// Waits up to `heading_wait` for the heading to render first. The page may
/// legitimately have no heading (consent wall, layout change), in which case
/// the fallbacks still run.
pub async fn collect_place_info<D: Document>(doc: &D, heading_wait: Duration) -> PlaceInfo {
    let heading = Locator::css(HEADING_SELECTOR);
    if let Err(e) = wait_for(doc, &heading, heading_wait, HEADING_POLL_INTERVAL).await {
        debug!("Heading did not appear: {}", e);
    }

    let name = resolve_place_name(doc).await;
    let category = first_node_text(doc, &[CATEGORY_SELECTOR])
        .await
        .unwrap_or_default();
    let address = first_node_text(doc, &ADDRESS_SELECTORS)
        .await
        .unwrap_or_default();
    let coordinates = resolve_coordinates(doc).await;

    PlaceInfo {
        name,
        category,
        address,
        coordinates,
    }
}
