//! Static HTML backend
//!
//! Parses a page snapshot with `scraper` and answers CSS queries against it.
//! Used for saved pages and for exercising the extractors without a browser.
//! Clicking and scrolling are accepted and ignored; XPath is not supported.

use std::rc::Rc;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use super::{Document, DocumentError, DocumentResult, Locator, Node};

fn parse_selector(css: &str) -> DocumentResult<Selector> {
    Selector::parse(css).map_err(|e| DocumentError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// A parsed HTML snapshot plus the URL it was loaded from
#[derive(Clone)]
pub struct HtmlDocument {
    html: Rc<Html>,
    url: Option<String>,
}

impl HtmlDocument {
    #[must_use]
    pub fn parse(source: &str, url: Option<&str>) -> Self {
        Self {
            html: Rc::new(Html::parse_document(source)),
            url: url.map(str::to_string),
        }
    }

    fn select(&self, css: &str) -> DocumentResult<Vec<HtmlNode>> {
        let selector = parse_selector(css)?;
        Ok(self
            .html
            .select(&selector)
            .map(|el| HtmlNode {
                html: Rc::clone(&self.html),
                id: el.id(),
            })
            .collect())
    }
}

/// Element handle into an [`HtmlDocument`]
#[derive(Clone)]
pub struct HtmlNode {
    html: Rc<Html>,
    id: NodeId,
}

impl HtmlNode {
    fn element(&self) -> DocumentResult<ElementRef<'_>> {
        self.html
            .tree
            .get(self.id)
            .and_then(ElementRef::wrap)
            .ok_or_else(|| DocumentError::Browser("Stale element handle".to_string()))
    }
}

impl Node for HtmlNode {
    async fn text(&self) -> DocumentResult<Option<String>> {
        let text: String = self.element()?.text().collect();
        Ok(Some(text))
    }

    async fn attribute(&self, name: &str) -> DocumentResult<Option<String>> {
        Ok(self.element()?.value().attr(name).map(str::to_string))
    }

    async fn find_all(&self, css: &str) -> DocumentResult<Vec<Self>> {
        let selector = parse_selector(css)?;
        Ok(self
            .element()?
            .select(&selector)
            .map(|el| HtmlNode {
                html: Rc::clone(&self.html),
                id: el.id(),
            })
            .collect())
    }

    async fn click(&self) -> DocumentResult<()> {
        Ok(())
    }

    async fn scroll_height(&self) -> DocumentResult<f64> {
        Ok(0.0)
    }

    async fn scroll_to_bottom(&self) -> DocumentResult<()> {
        Ok(())
    }
}

impl Document for HtmlDocument {
    type Node = HtmlNode;

    async fn current_url(&self) -> DocumentResult<Option<String>> {
        Ok(self.url.clone())
    }

    async fn title(&self) -> DocumentResult<Option<String>> {
        let nodes = self.select("title")?;
        match nodes.first() {
            Some(node) => node.text().await,
            None => Ok(None),
        }
    }

    async fn find_all(&self, locator: &Locator) -> DocumentResult<Vec<HtmlNode>> {
        match locator {
            Locator::Css(css) => self.select(css),
            Locator::XPath(_) => Err(DocumentError::Unsupported(locator.to_string())),
        }
    }
}
