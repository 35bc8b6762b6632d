//! Link discovery through the Places web service
//!
//! Walks a grid of search centres for each place type, follows result
//! pagination, and keeps the places that pass the keyword and region
//! filters as canonical `place_id` links.

pub mod client;
pub mod discovery;
pub mod filters;
pub mod paginator;
pub mod types;

pub use client::{GooglePlacesClient, NearbyRequest, PlacesApi, PlacesError, PlacesResult};
pub use discovery::{CandidateOutcome, DiscoveryStats, LinkDiscovery};
pub use filters::{KeywordFilter, RegionFilter};
pub use paginator::Paginator;
pub use types::{
    AddressComponent, ApiStatus, NearbySearchResponse, PlaceDetails, PlaceDetailsResponse,
    PlaceSummary,
};
