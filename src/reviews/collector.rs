//! Incremental review collection
//!
//! The reviews list is virtualized: cards are only rendered once the panel
//! has been scrolled near them. The collector keeps scrolling until it has
//! enough cards, until the card count stops growing, or until the time
//! budget is spent, and only then reads the cards.

use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, trace};

use super::dates::normalize_review_date;
use super::rating::resolve_rating;
use super::types::ReviewCard;
use crate::config::ScrollSettings;
use crate::document::{
    Document, DocumentError, DocumentResult, Locator, Node, node_text, wait_for,
};
use crate::utils::constants::{
    MIN_REVIEW_CONTENT_CHARS, REVIEW_AUTHOR_SELECTORS, REVIEW_CARD_SELECTOR, REVIEW_DATE_SELECTOR,
    REVIEW_PANEL_SELECTOR, REVIEW_READ_MORE_SELECTOR, REVIEW_SCROLL_SELECTOR, REVIEW_TEXT_SELECTOR,
    UNKNOWN_DATE,
};
use crate::utils::safe_truncate_chars;

const CONTAINER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Why the scroll loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStop {
    /// At least `max_reviews` cards are rendered
    Enough,
    /// The card count did not change for more than `stagnation_limit` rounds
    Stagnated,
    /// The time budget ran out
    TimedOut,
}

/// Termination bookkeeping for the scroll loop
#[derive(Debug, Clone)]
pub struct ScrollProgress {
    max_reviews: usize,
    stagnation_limit: u32,
    max_duration: Duration,
    last_count: usize,
    stagnant_rounds: u32,
}

impl ScrollProgress {
    #[must_use]
    pub fn new(settings: &ScrollSettings, max_reviews: usize) -> Self {
        Self {
            max_reviews,
            stagnation_limit: settings.stagnation_limit,
            max_duration: settings.max_duration(),
            last_count: 0,
            stagnant_rounds: 0,
        }
    }

    /// Checked before each round.
    #[must_use]
    pub fn check_before_round(&self, elapsed: Duration) -> Option<ScrollStop> {
        if self.last_count >= self.max_reviews {
            Some(ScrollStop::Enough)
        } else if elapsed >= self.max_duration {
            Some(ScrollStop::TimedOut)
        } else {
            None
        }
    }

    /// Record the card count after a round.
    pub fn record_round(&mut self, count: usize) -> Option<ScrollStop> {
        if count == self.last_count {
            self.stagnant_rounds += 1;
        } else {
            self.stagnant_rounds = 0;
        }
        self.last_count = count;

        if self.stagnant_rounds > self.stagnation_limit {
            Some(ScrollStop::Stagnated)
        } else {
            None
        }
    }

    #[must_use]
    pub fn stagnant_rounds(&self) -> u32 {
        self.stagnant_rounds
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.last_count
    }
}

/// Content gate: review text must be longer than a few characters.
#[must_use]
pub fn is_meaningful_content(content: &str) -> bool {
    content.chars().count() > MIN_REVIEW_CONTENT_CHARS
}

/// Scrolls the open reviews panel and extracts review cards
pub struct ReviewCollector<'a> {
    settings: &'a ScrollSettings,
    max_reviews: usize,
    today: NaiveDate,
}

impl<'a> ReviewCollector<'a> {
    /// `today` is the reference day for relative review dates.
    #[must_use]
    pub fn new(settings: &'a ScrollSettings, max_reviews: usize, today: NaiveDate) -> Self {
        Self {
            settings,
            max_reviews,
            today,
        }
    }

    /// Collect up to `max_reviews` cards that pass the content gate.
    ///
    /// Fails only when the scrollable container cannot be found.
    pub async fn collect<D: Document>(&self, doc: &D) -> DocumentResult<Vec<ReviewCard>> {
        let container = self.find_container(doc).await?;
        info!("Located scrollable reviews container.");

        let cards = self.scroll_until_loaded(doc, &container).await;
        if cards.is_empty() {
            return Ok(Vec::new());
        }

        let mut accepted = Vec::new();
        for card in &cards {
            if let Some(review) = self.extract_card(card).await {
                accepted.push(review);
            }
            if accepted.len() >= self.max_reviews {
                break;
            }
        }

        debug!(
            "Kept {} of {} rendered review cards",
            accepted.len(),
            cards.len()
        );
        Ok(accepted)
    }

    /// The full class chain first, then the bare panel class.
    async fn find_container<D: Document>(&self, doc: &D) -> DocumentResult<D::Node> {
        let timeout = self.settings.container_wait();
        let full = Locator::css(REVIEW_SCROLL_SELECTOR);

        match wait_for(doc, &full, timeout, CONTAINER_POLL_INTERVAL).await {
            Ok(node) => Ok(node),
            Err(e) => {
                debug!("{}; trying the bare panel selector", e);
                let bare = Locator::css(REVIEW_PANEL_SELECTOR);
                wait_for(doc, &bare, timeout, CONTAINER_POLL_INTERVAL)
                    .await
                    .map_err(|_| DocumentError::Timeout {
                        operation: "Locating the reviews container".to_string(),
                        timeout,
                    })
            }
        }
    }

    /// Scroll in rounds until [`ScrollProgress`] says stop, then return the
    /// cards rendered at that point.
    async fn scroll_until_loaded<D: Document>(
        &self,
        doc: &D,
        container: &D::Node,
    ) -> Vec<D::Node> {
        let cards_locator = Locator::css(REVIEW_CARD_SELECTOR);
        let mut progress = ScrollProgress::new(self.settings, self.max_reviews);
        let mut cards = Vec::new();
        let start = Instant::now();

        loop {
            if let Some(stop) = progress.check_before_round(start.elapsed()) {
                debug!("Scrolling stopped: {:?}", stop);
                break;
            }

            match container.scroll_height().await {
                Ok(height) => trace!("Container height before round: {}", height),
                Err(e) => trace!("Could not read container height: {}", e),
            }

            for _ in 0..self.settings.pulses_per_round {
                if let Err(e) = container.scroll_to_bottom().await {
                    trace!("Scroll pulse failed: {}", e);
                }
                tokio::time::sleep(self.settings.pulse_pause()).await;
            }

            cards = doc.find_all(&cards_locator).await.unwrap_or_else(|e| {
                debug!("Review card query failed: {}", e);
                Vec::new()
            });

            if let Some(stop) = progress.record_round(cards.len()) {
                info!("No more reviews are loading.");
                debug!("Scrolling stopped: {:?}", stop);
                break;
            }
        }

        cards
    }

    /// Read one card. `None` when it fails the content gate.
    async fn extract_card<N: Node>(&self, card: &N) -> Option<ReviewCard> {
        let author = self.extract_author(card).await;
        let rating = resolve_rating(card).await;

        let date = match node_text(card, REVIEW_DATE_SELECTOR).await {
            Some(raw) => normalize_review_date(&raw, self.today),
            None => UNKNOWN_DATE.to_string(),
        };

        self.expand_text(card).await;
        let content = node_text(card, REVIEW_TEXT_SELECTOR)
            .await
            .unwrap_or_default();

        if !is_meaningful_content(&content) {
            trace!("Dropping short review: {:?}", content);
            return None;
        }

        trace!("Review: {}", safe_truncate_chars(&content, 60));
        Some(ReviewCard {
            author,
            date,
            rating,
            content,
        })
    }

    async fn extract_author<N: Node>(&self, card: &N) -> Option<String> {
        for selector in REVIEW_AUTHOR_SELECTORS {
            if let Some(author) = node_text(card, selector).await
                && !author.is_empty()
            {
                return Some(author);
            }
        }
        None
    }

    /// Click "More" on truncated reviews. Missing buttons are normal.
    async fn expand_text<N: Node>(&self, card: &N) {
        let Ok(Some(button)) = card.find(REVIEW_READ_MORE_SELECTOR).await else {
            return;
        };
        match button.click().await {
            Ok(()) => tokio::time::sleep(self.settings.read_more_pause()).await,
            Err(e) => trace!("Read-more click failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ScrollSettings {
        ScrollSettings::default()
    }

    #[test]
    fn test_progress_stops_when_enough() {
        let mut progress = ScrollProgress::new(&settings(), 10);
        assert_eq!(progress.check_before_round(Duration::ZERO), None);
        assert_eq!(progress.record_round(12), None);
        assert_eq!(
            progress.check_before_round(Duration::from_secs(1)),
            Some(ScrollStop::Enough)
        );
    }

    #[test]
    fn test_progress_stagnation_needs_more_than_limit() {
        let mut progress = ScrollProgress::new(&settings(), 100);
        assert_eq!(progress.record_round(8), None);
        for _ in 0..15 {
            assert_eq!(progress.record_round(8), None);
        }
        assert_eq!(progress.stagnant_rounds(), 15);
        assert_eq!(progress.record_round(8), Some(ScrollStop::Stagnated));
    }

    #[test]
    fn test_progress_growth_resets_stagnation() {
        let mut progress = ScrollProgress::new(&settings(), 100);
        for _ in 0..10 {
            progress.record_round(0);
        }
        assert_eq!(progress.stagnant_rounds(), 10);
        progress.record_round(5);
        assert_eq!(progress.stagnant_rounds(), 0);
        assert_eq!(progress.card_count(), 5);
    }

    #[test]
    fn test_progress_time_budget() {
        let progress = ScrollProgress::new(&settings(), 100);
        assert_eq!(
            progress.check_before_round(Duration::from_secs(300)),
            Some(ScrollStop::TimedOut)
        );
    }

    #[test]
    fn test_content_gate_counts_characters() {
        assert!(!is_meaningful_content(""));
        assert!(!is_meaningful_content("Добре"));
        assert!(!is_meaningful_content("12345"));
        assert!(is_meaningful_content("123456"));
        assert!(is_meaningful_content("Чудово"));
    }
}
