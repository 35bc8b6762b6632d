//! Opening the reviews panel of a place

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::TabSettings;
use crate::document::{Document, Locator, Node, wait_for};
use crate::utils::constants::{REVIEW_PANEL_SELECTOR, REVIEW_TAB_CSS, REVIEW_TAB_XPATHS};

/// Tab candidates in the order they are tried: localized button text first,
/// then one combined `aria-label` selector.
#[must_use]
pub fn review_tab_locators() -> Vec<Locator> {
    REVIEW_TAB_XPATHS
        .iter()
        .map(|x| Locator::xpath(*x))
        .chain(std::iter::once(Locator::css(REVIEW_TAB_CSS)))
        .collect()
}

/// Find and click the reviews tab, then wait for the panel.
///
/// Each candidate gets `selector_timeout` to appear. A candidate that can be
/// clicked but never produces the panel does not end the search; the next
/// candidate is tried. Returns `false` when no candidate worked.
pub async fn activate_reviews_tab<D: Document>(doc: &D, settings: &TabSettings) -> bool {
    let start = Instant::now();
    let panel = Locator::css(REVIEW_PANEL_SELECTOR);

    for locator in review_tab_locators() {
        let tab = match wait_for(
            doc,
            &locator,
            settings.selector_timeout(),
            settings.poll_interval(),
        )
        .await
        {
            Ok(tab) => tab,
            Err(_) => continue,
        };

        if let Err(e) = tab.click().await {
            debug!("Click on {} failed: {}", locator, e);
            continue;
        }

        match wait_for(doc, &panel, settings.panel_timeout(), settings.poll_interval()).await {
            Ok(_) => {
                info!(
                    "Clicked 'Reviews' tab via {} in {:.2}s",
                    locator,
                    start.elapsed().as_secs_f64()
                );
                return true;
            }
            Err(e) => debug!("Reviews panel did not open after {}: {}", locator, e),
        }
    }

    warn!(
        "'Reviews' tab not found after {:.2}s",
        start.elapsed().as_secs_f64()
    );
    false
}
