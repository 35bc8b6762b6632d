//! HTTP access to the Places nearby-search and details endpoints

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

use super::types::{ApiStatus, NearbySearchResponse, PlaceDetails, PlaceDetailsResponse};
use crate::config::{DiscoveryConfig, GridPoint};
use crate::utils::constants::DETAILS_FIELDS;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: &'static str, status: u16 },

    #[error("{endpoint} returned invalid JSON: {source}")]
    Json {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} returned status {status:?} {message}")]
    Status {
        endpoint: &'static str,
        status: ApiStatus,
        message: String,
    },
}

pub type PlacesResult<T> = Result<T, PlacesError>;

/// A nearby-search call: either a fresh query or a follow-up page
#[derive(Debug, Clone, Copy)]
pub enum NearbyRequest<'a> {
    Initial {
        location: &'a GridPoint,
        radius_m: u32,
        place_type: &'a str,
    },
    /// Google requires only the token (and key) for follow-up pages
    Page { token: &'a str },
}

impl NearbyRequest<'_> {
    #[must_use]
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page { .. })
    }
}

/// The two Places operations the link crawler needs
#[allow(async_fn_in_trait)]
pub trait PlacesApi {
    /// One nearby-search page. Non-OK statuses are returned in the response,
    /// not as errors; the paginator decides what they mean.
    async fn nearby_search(&self, request: &NearbyRequest<'_>) -> PlacesResult<NearbySearchResponse>;

    /// Details of one place. Anything but a successful lookup is an error.
    async fn place_details(&self, place_id: &str) -> PlacesResult<PlaceDetails>;
}

/// `PlacesApi` over the Google Maps web service
pub struct GooglePlacesClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    nearby_timeout: Duration,
    details_timeout: Duration,
}

impl GooglePlacesClient {
    pub fn new(config: &DiscoveryConfig) -> PlacesResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(PlacesError::Client)?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            nearby_timeout: config.nearby_timeout(),
            details_timeout: config.details_timeout(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> PlacesResult<T> {
        let url = format!("{}/{}/json", self.api_base, endpoint);
        trace!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| PlacesError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacesError::HttpStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| PlacesError::Request { endpoint, source })?;
        serde_json::from_str(&body).map_err(|source| PlacesError::Json { endpoint, source })
    }
}

impl PlacesApi for GooglePlacesClient {
    async fn nearby_search(&self, request: &NearbyRequest<'_>) -> PlacesResult<NearbySearchResponse> {
        let response: NearbySearchResponse = match *request {
            NearbyRequest::Initial {
                location,
                radius_m,
                place_type,
            } => {
                let location = location.as_param();
                let radius = radius_m.to_string();
                self.get_json(
                    "nearbysearch",
                    &[
                        ("location", location.as_str()),
                        ("radius", radius.as_str()),
                        ("type", place_type),
                    ],
                    self.nearby_timeout,
                )
                .await?
            }
            NearbyRequest::Page { token } => {
                self.get_json("nearbysearch", &[("pagetoken", token)], self.nearby_timeout)
                    .await?
            }
        };

        debug!(
            "Nearby search: {:?}, {} results, next page: {}",
            response.status,
            response.results.len(),
            response.next_page_token().is_some()
        );
        Ok(response)
    }

    async fn place_details(&self, place_id: &str) -> PlacesResult<PlaceDetails> {
        let response: PlaceDetailsResponse = self
            .get_json(
                "details",
                &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
                self.details_timeout,
            )
            .await?;

        match (response.status, response.result) {
            (ApiStatus::Ok, Some(details)) => Ok(details),
            (status, _) => Err(PlacesError::Status {
                endpoint: "details",
                status,
                message: response.error_message.unwrap_or_default(),
            }),
        }
    }
}
