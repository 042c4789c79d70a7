//! HTTP client for the Places API (New) `places:searchNearby` endpoint.
//!
//! Wraps `reqwest` with the field mask, API key handling, and status
//! checking. The response body is returned as raw JSON; shape normalization
//! lives in [`crate::normalize`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::NearbySearchRequest;
use crate::NearbySearch;

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/";
const SEARCH_NEARBY_PATH: &str = "v1/places:searchNearby";

/// Fields requested from the API. Anything not listed is omitted from the
/// response, and billing is based on this list.
pub const FIELD_MASK: &str = "places.id,\
places.displayName,\
places.websiteUri,\
places.nationalPhoneNumber,\
places.currentOpeningHours,\
places.googleMapsUri,\
places.primaryType,\
places.primaryTypeDisplayName,\
places.addressComponents";

/// Error bodies can be large HTML pages; keep only the head for the error.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Client for the Places API.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests. The API key is supplied per call so
/// the stored credential stays the single source of truth.
pub struct PlacesClient {
    client: Client,
    endpoint: Url,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(SEARCH_NEARBY_PATH))
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }

    /// The `searchNearby` URL for `api_key`, with the key percent-encoded.
    fn build_url(&self, api_key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", api_key);
        url
    }
}

impl NearbySearch for PlacesClient {
    /// Sends one `searchNearby` request and returns the parsed JSON body.
    ///
    /// No retries: a failed call surfaces immediately.
    async fn search_nearby(
        &self,
        api_key: &str,
        request: &NearbySearchRequest,
    ) -> Result<serde_json::Value, PlacesError> {
        let url = self.build_url(api_key);
        tracing::debug!(
            endpoint = %self.endpoint,
            radius = request.location_restriction.circle.radius,
            excluded_types = request.excluded_types.len(),
            "sending nearby search"
        );

        let response = self
            .client
            .post(url)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            tracing::warn!(status = status.as_u16(), "nearby search rejected");
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: self.endpoint.to_string(),
            source: e,
        })
    }
}
