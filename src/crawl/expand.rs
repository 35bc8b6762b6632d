//! Short-link expansion
//!
//! `maps.app.goo.gl` and friends redirect to the real place URL. We follow
//! the redirects with a plain HTTP client and only accept the result if it
//! actually lands on a maps page.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::utils::constants::CHROME_USER_AGENT;
use crate::utils::is_maps_url;

#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Expanded URL does not appear to be Google Maps: {0}")]
    NotMaps(String),
}

/// Redirect-following HTTP client for short links
#[derive(Debug, Clone)]
pub struct ShortLinkExpander {
    client: reqwest::Client,
}

impl ShortLinkExpander {
    pub fn new(timeout: Duration) -> Result<Self, ExpandError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(CHROME_USER_AGENT)
            .build()
            .map_err(ExpandError::Client)?;
        Ok(Self { client })
    }

    /// Follow redirects from `short_url` and return the final maps URL.
    pub async fn expand(&self, short_url: &str) -> Result<String, ExpandError> {
        let response = self
            .client
            .get(short_url)
            .send()
            .await
            .map_err(|source| ExpandError::Request {
                url: short_url.to_string(),
                source,
            })?;

        let final_url = response.url().to_string();
        if is_maps_url(&final_url) {
            info!("Expanded URL: {}", final_url);
            Ok(final_url)
        } else {
            warn!("Expanded URL does not appear to be Google Maps: {}", final_url);
            Err(ExpandError::NotMaps(final_url))
        }
    }
}
