//! Nearby-search paging with page-token warm-up retries
//!
//! A `next_page_token` is not usable the moment it is issued; until Google
//! has propagated it, requests with it come back `INVALID_REQUEST`. Those
//! requests are retried after a short sleep. Every other status, including
//! `ZERO_RESULTS` and `OVER_QUERY_LIMIT`, is handed back as-is.

use tracing::{debug, warn};

use super::client::{NearbyRequest, PlacesApi, PlacesResult};
use super::types::{ApiStatus, NearbySearchResponse};
use crate::config::PageTokenRetry;

pub struct Paginator<'a, A: PlacesApi> {
    api: &'a A,
    retry: PageTokenRetry,
    retries: u32,
}

impl<'a, A: PlacesApi> Paginator<'a, A> {
    pub fn new(api: &'a A, retry: PageTokenRetry) -> Self {
        Self {
            api,
            retry,
            retries: 0,
        }
    }

    /// Total page-token retries performed so far
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Fetch one page.
    ///
    /// At most `max_attempts` requests are made, sleeping `delay` between
    /// them. Transport and decoding errors are not retried.
    pub async fn fetch(&mut self, request: &NearbyRequest<'_>) -> PlacesResult<NearbySearchResponse> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let response = self.api.nearby_search(request).await?;

            let warming_up = response.status == ApiStatus::InvalidRequest && request.is_page();
            if !warming_up {
                if response.status != ApiStatus::Ok {
                    debug!(
                        "Nearby search returned {:?}{}",
                        response.status,
                        response
                            .error_message
                            .as_deref()
                            .map(|m| format!(": {m}"))
                            .unwrap_or_default()
                    );
                }
                return Ok(response);
            }

            if attempt >= max_attempts {
                warn!("Page token still invalid after {} attempts", attempt);
                return Ok(response);
            }

            debug!(
                "Page token not ready (attempt {}/{}), retrying in {:?}",
                attempt,
                max_attempts,
                self.retry.delay()
            );
            self.retries += 1;
            attempt += 1;
            tokio::time::sleep(self.retry.delay()).await;
        }
    }
}
