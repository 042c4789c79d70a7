//! Client for the Places API `searchNearby` endpoint.
//!
//! [`PlacesClient`] is the production [`NearbySearch`] implementation;
//! [`normalize_response`] turns its raw JSON into canonical
//! [`poiscan_core::PlaceRecord`]s.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

use std::future::Future;

pub use client::{PlacesClient, FIELD_MASK};
pub use error::PlacesError;
pub use normalize::{normalize_place, normalize_response};
pub use types::{Center, Circle, LocationRestriction, NearbySearchRequest, RankPreference};

/// The upstream nearby-search collaborator.
///
/// Implementations perform exactly one request per call and return the
/// undecoded response body; any non-success outcome is a [`PlacesError`].
pub trait NearbySearch: Send + Sync {
    fn search_nearby(
        &self,
        api_key: &str,
        request: &NearbySearchRequest,
    ) -> impl Future<Output = Result<serde_json::Value, PlacesError>> + Send;
}
