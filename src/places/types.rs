//! Places web service wire types
//!
//! Only the fields the link crawler reads are modelled; serde ignores the
//! rest of the (large) responses.

use serde::Deserialize;

/// Response status shared by the nearby-search and details endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    NotFound,
    Other(String),
}

impl From<String> for ApiStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "UNKNOWN_ERROR" => Self::UnknownError,
            "NOT_FOUND" => Self::NotFound,
            _ => Self::Other(status),
        }
    }
}

impl Default for ApiStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

/// One page of nearby-search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl NearbySearchResponse {
    /// Token for the following page, if any
    #[must_use]
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// A search hit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceSummary {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: ApiStatus,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    #[must_use]
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}
