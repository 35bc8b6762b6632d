//! Browser session control for the review crawler
//!
//! One Chrome instance with one tab is held for the whole run. The
//! [`Navigator`] trait is what the crawl loop needs from it: navigate,
//! clear the cookie wall, and expose the loaded page as a [`Document`].

mod session;

pub use session::BrowserSession;

use crate::document::{Document, DocumentResult};

/// A [`Document`] that can be pointed at a new URL
#[allow(async_fn_in_trait)]
pub trait Navigator: Document {
    /// Load `url` in the session's tab
    async fn open(&self, url: &str) -> DocumentResult<()>;

    /// Best-effort dismissal of the cookie consent dialog.
    ///
    /// Never fails; a missing banner is the normal case outside the EU.
    async fn dismiss_consent(&self);
}
