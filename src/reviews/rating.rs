//! Star rating of a review card
//!
//! Maps renders the rating as a labelled span whose wording depends on the
//! UI locale ("5 stars", "Оцінка: 4", "4,0 estrellas"). We only need the
//! first number in the label.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::document::{Node, node_attribute};
use crate::utils::constants::{RATING_IMG_SELECTOR, RATING_KEYWORDS, RATING_SELECTORS};

static RATING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)").expect("Invalid rating regex"));

/// First decimal-looking number in `text`, with a comma separator turned
/// into a period.
#[must_use]
pub fn extract_rating_number(text: &str) -> Option<String> {
    RATING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(',', "."))
}

/// Resolve the rating of a review card. Returns an empty string when no
/// rating can be found.
pub async fn resolve_rating<N: Node>(card: &N) -> String {
    for selector in RATING_SELECTORS {
        let Some(node) = first_match(card, selector).await else {
            continue;
        };

        let label = match node_attribute(&node, "aria-label").await {
            Some(label) if !label.trim().is_empty() => label,
            _ => node.text().await.ok().flatten().unwrap_or_default(),
        };

        if let Some(rating) = extract_rating_number(label.trim()) {
            trace!("Rating {} via {}", rating, selector);
            return rating;
        }
    }

    rating_from_labelled_images(card).await.unwrap_or_default()
}

/// Scan every labelled `role=img` node for a rating-like label
async fn rating_from_labelled_images<N: Node>(card: &N) -> Option<String> {
    let images = match card.find_all(RATING_IMG_SELECTOR).await {
        Ok(images) => images,
        Err(e) => {
            trace!("Rating image lookup failed: {}", e);
            return None;
        }
    };

    for image in images {
        let Some(label) = node_attribute(&image, "aria-label").await else {
            continue;
        };
        let label = label.to_lowercase();
        if is_rating_label(&label)
            && let Some(rating) = extract_rating_number(&label)
        {
            trace!("Rating {} via labelled image", rating);
            return Some(rating);
        }
    }
    None
}

fn is_rating_label(label: &str) -> bool {
    RATING_KEYWORDS.iter().any(|k| label.contains(k))
}

async fn first_match<N: Node>(card: &N, css: &str) -> Option<N> {
    card.find(css).await.unwrap_or_else(|e| {
        trace!("Rating selector '{}' failed: {}", css, e);
        None
    })
}
