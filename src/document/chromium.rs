//! Live Chrome backend
//!
//! Implements [`Document`] for a chromiumoxide [`Page`] and [`Node`] for its
//! elements. Element-level actions run as `Runtime.callFunctionOn` so that
//! clicks and scrolls happen in page context.

use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use tracing::trace;

use super::{Document, DocumentError, DocumentResult, Locator, Node};

const CLICK_FN: &str = "function() { this.click(); }";
const SCROLL_HEIGHT_FN: &str = "function() { return this.scrollHeight; }";
const SCROLL_TO_BOTTOM_FN: &str = "function() { this.scrollTop = this.scrollHeight; }";

impl From<CdpError> for DocumentError {
    fn from(err: CdpError) -> Self {
        Self::Browser(err.to_string())
    }
}

/// Element handle on a live page
pub struct ChromeNode(Element);

impl Node for ChromeNode {
    async fn text(&self) -> DocumentResult<Option<String>> {
        Ok(self.0.inner_text().await?)
    }

    async fn attribute(&self, name: &str) -> DocumentResult<Option<String>> {
        Ok(self.0.attribute(name).await?)
    }

    async fn find_all(&self, css: &str) -> DocumentResult<Vec<Self>> {
        let elements = self.0.find_elements(css).await?;
        Ok(elements.into_iter().map(ChromeNode).collect())
    }

    async fn click(&self) -> DocumentResult<()> {
        self.0.call_js_fn(CLICK_FN, false).await?;
        Ok(())
    }

    async fn scroll_height(&self) -> DocumentResult<f64> {
        let returns = self.0.call_js_fn(SCROLL_HEIGHT_FN, false).await?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_f64())
            .unwrap_or_default())
    }

    async fn scroll_to_bottom(&self) -> DocumentResult<()> {
        self.0.call_js_fn(SCROLL_TO_BOTTOM_FN, false).await?;
        Ok(())
    }
}

impl Document for Page {
    type Node = ChromeNode;

    async fn current_url(&self) -> DocumentResult<Option<String>> {
        Ok(self.url().await?)
    }

    async fn title(&self) -> DocumentResult<Option<String>> {
        Ok(self.get_title().await?)
    }

    async fn find_all(&self, locator: &Locator) -> DocumentResult<Vec<ChromeNode>> {
        let elements = match locator {
            Locator::Css(css) => self.find_elements(css.as_str()).await,
            Locator::XPath(xpath) => self.find_xpaths(xpath.as_str()).await,
        };

        match elements {
            Ok(elements) => Ok(elements.into_iter().map(ChromeNode).collect()),
            // Chrome reports "no node" as a protocol error for XPath lookups
            Err(CdpError::NotFound) => {
                trace!("No match for {}", locator);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}
