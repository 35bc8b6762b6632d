//! Helpers for consistent error handling around document queries
//!
//! Scraping code treats "element missing" and "query failed" the same way:
//! the field falls back. These helpers fold both into `None` and leave a
//! trace-level breadcrumb so the difference is still visible in logs.

use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

use super::{Document, DocumentError, DocumentResult, Locator, Node};

/// Poll until `locator` matches or `timeout` elapses.
///
/// Always performs at least one lookup, so a zero timeout is a plain check.
/// Query errors are treated as "not there yet".
pub async fn wait_for<D: Document>(
    doc: &D,
    locator: &Locator,
    timeout: Duration,
    poll_interval: Duration,
) -> DocumentResult<D::Node> {
    let start = Instant::now();

    loop {
        match doc.find(locator).await {
            Ok(Some(node)) => {
                trace!("{} appeared after {:?}", locator, start.elapsed());
                return Ok(node);
            }
            Ok(None) => {}
            Err(e) => trace!("Lookup of {} failed while waiting: {}", locator, e),
        }

        if start.elapsed() >= timeout {
            return Err(DocumentError::Timeout {
                operation: format!("Waiting for {locator}"),
                timeout,
            });
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// Wait for the first of several locators, each with its own timeout.
///
/// Returns the node together with the index of the locator that matched.
pub async fn wait_for_any<D: Document>(
    doc: &D,
    locators: &[Locator],
    timeout_each: Duration,
    poll_interval: Duration,
) -> Option<(usize, D::Node)> {
    for (index, locator) in locators.iter().enumerate() {
        match wait_for(doc, locator, timeout_each, poll_interval).await {
            Ok(node) => return Some((index, node)),
            Err(e) => trace!("{}", e),
        }
    }
    None
}

/// Trimmed text of the first descendant matching `css`.
///
/// Returns `None` when the element is missing, the query fails, or the
/// element has no text.
pub async fn node_text<N: Node>(node: &N, css: &str) -> Option<String> {
    match node.find(css).await {
        Ok(Some(child)) => match child.text().await {
            Ok(text) => text.map(|t| t.trim().to_string()),
            Err(e) => {
                trace!("Failed to read text of '{}': {}", css, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            trace!("Failed to query '{}': {}", css, e);
            None
        }
    }
}

/// Attribute of a node, with failures folded into `None`
pub async fn node_attribute<N: Node>(node: &N, name: &str) -> Option<String> {
    node.attribute(name).await.unwrap_or_else(|e| {
        trace!("Failed to read attribute '{}': {}", name, e);
        None
    })
}

/// Trimmed, non-empty text of the first document element matching any of
/// `selectors`, tried in order.
pub async fn first_node_text<D: Document>(doc: &D, selectors: &[&str]) -> Option<String> {
    for selector in selectors {
        let locator = Locator::css(*selector);
        let node = match doc.find(&locator).await {
            Ok(Some(node)) => node,
            Ok(None) => continue,
            Err(e) => {
                trace!("Failed to query {}: {}", locator, e);
                continue;
            }
        };

        if let Ok(Some(text)) = node.text().await {
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}
