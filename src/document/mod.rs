//! Query-by-selector view of a rendered page.
//!
//! Extraction code never talks to chromiumoxide directly. It works against
//! the [`Document`] and [`Node`] traits so the same fallback chains run on a
//! live Chrome tab ([`chromium`]) and on saved or fixture HTML ([`html`]).

pub mod chromium;
pub mod helpers;
pub mod html;

use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub use helpers::{first_node_text, node_attribute, node_text, wait_for, wait_for_any};
pub use html::{HtmlDocument, HtmlNode};

/// How to find elements in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css:{s}"),
            Self::XPath(s) => write!(f, "xpath:{s}"),
        }
    }
}

/// Errors raised by document queries
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Locator not supported by this document: {0}")]
    Unsupported(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("{operation} timeout after {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// A single element inside a [`Document`].
///
/// Only CSS is supported below the document level; XPath lookups are
/// page-wide in every backend we use.
#[allow(async_fn_in_trait)]
pub trait Node: Sized {
    /// Rendered text of the element
    async fn text(&self) -> DocumentResult<Option<String>>;

    async fn attribute(&self, name: &str) -> DocumentResult<Option<String>>;

    /// All descendants matching a CSS selector
    async fn find_all(&self, css: &str) -> DocumentResult<Vec<Self>>;

    async fn find(&self, css: &str) -> DocumentResult<Option<Self>> {
        Ok(self.find_all(css).await?.into_iter().next())
    }

    /// Script-level click (`element.click()` in page context). Bypasses
    /// overlays that would swallow a synthetic mouse event.
    async fn click(&self) -> DocumentResult<()>;

    /// Current `scrollHeight` of the element
    async fn scroll_height(&self) -> DocumentResult<f64>;

    /// Set `scrollTop` to `scrollHeight`
    async fn scroll_to_bottom(&self) -> DocumentResult<()>;
}

/// A loaded page that can be queried by selector
#[allow(async_fn_in_trait)]
pub trait Document {
    type Node: Node;

    /// URL of the currently loaded document, if any
    async fn current_url(&self) -> DocumentResult<Option<String>>;

    /// Document title
    async fn title(&self) -> DocumentResult<Option<String>>;

    async fn find_all(&self, locator: &Locator) -> DocumentResult<Vec<Self::Node>>;

    async fn find(&self, locator: &Locator) -> DocumentResult<Option<Self::Node>> {
        Ok(self.find_all(locator).await?.into_iter().next())
    }
}
