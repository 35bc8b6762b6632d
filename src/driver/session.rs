//! Chrome session lifecycle
//!
//! Wraps the chromiumoxide `Browser`, its CDP handler task and the single
//! working tab. The handler MUST be aborted when the browser goes away or it
//! keeps running after Chrome exits; `Drop` takes care of that if `quit()`
//! was never reached.

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::Navigator;
use crate::browser_setup::launch_browser;
use crate::document::chromium::ChromeNode;
use crate::document::{Document, DocumentError, DocumentResult, Locator, Node, wait_for};
use crate::utils::constants::{
    CONSENT_BUTTON_XPATH, CONSENT_SETTLE_MS, CONSENT_WAIT_SECS, NAVIGATION_TIMEOUT_SECS,
};

pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserSession {
    /// Launch Chrome and open a blank working tab.
    ///
    /// Failure here is fatal for the review crawler.
    pub async fn launch(headless: bool) -> Result<Self> {
        let (browser, handler, user_data_dir) = launch_browser(headless).await?;

        let page = browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")?;

        Ok(Self {
            browser,
            page,
            handler,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Close Chrome, stop the handler and remove the temporary profile.
    pub async fn quit(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("Browser wait after close failed: {}", e);
        }
        self.handler.abort();
        self.cleanup_temp_dir();
        info!("Browser session closed");
    }

    /// Remove the profile directory.
    ///
    /// Must run after Chrome has exited so no file handles remain.
    fn cleanup_temp_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            debug!("Cleaning up temp directory: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!(
                    "Failed to clean up temp directory {}: {}. Manual cleanup may be required.",
                    path.display(),
                    e
                );
            }
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.user_data_dir.is_some() {
            warn!("BrowserSession dropped without quit() - removing temp dir in Drop");
            self.cleanup_temp_dir();
        }
    }
}

impl Document for BrowserSession {
    type Node = ChromeNode;

    async fn current_url(&self) -> DocumentResult<Option<String>> {
        Document::current_url(&self.page).await
    }

    async fn title(&self) -> DocumentResult<Option<String>> {
        Document::title(&self.page).await
    }

    async fn find_all(&self, locator: &Locator) -> DocumentResult<Vec<ChromeNode>> {
        Document::find_all(&self.page, locator).await
    }
}

impl Navigator for BrowserSession {
    async fn open(&self, url: &str) -> DocumentResult<()> {
        let timeout = Duration::from_secs(NAVIGATION_TIMEOUT_SECS);

        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(DocumentError::Timeout {
                    operation: format!("Navigation to {url}"),
                    timeout,
                });
            }
        }

        if let Err(e) = self.page.wait_for_navigation().await {
            debug!("wait_for_navigation after goto failed: {}", e);
        }

        info!("Opened {}", url);
        Ok(())
    }

    async fn dismiss_consent(&self) {
        let locator = Locator::xpath(CONSENT_BUTTON_XPATH);
        let button = match wait_for(
            self,
            &locator,
            Duration::from_secs(CONSENT_WAIT_SECS),
            Duration::from_millis(250),
        )
        .await
        {
            Ok(button) => button,
            Err(_) => {
                debug!("No consent dialog found");
                return;
            }
        };

        match button.click().await {
            Ok(()) => {
                info!("Dismissed cookie consent.");
                tokio::time::sleep(Duration::from_millis(CONSENT_SETTLE_MS)).await;
            }
            Err(e) => debug!("Consent button click failed: {}", e),
        }
    }
}
