//! Domain types shared by the places client, the scan pipeline, and
//! presentation layers.
//!
//! Serialized field names follow the persisted cache layout (`cacheKey`,
//! `missing`, `primaryTypeDisplayName`, ...) so entries written by older
//! installs still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A map center in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One entry of a place's structured address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub short_text: Option<String>,
    #[serde(default)]
    pub long_text: Option<String>,
}

impl AddressComponent {
    #[must_use]
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// Canonical point-of-interest record produced at the ingestion boundary.
///
/// Wire-level shape differences (display name as a plain string or as a
/// `{text}` / `{name}` object, opening hours as any JSON value) are already
/// resolved here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
    pub id: String,
    pub display_name: Option<String>,
    pub website_uri: Option<String>,
    pub national_phone_number: Option<String>,
    /// `true` only when the upstream sent a structured opening-hours value.
    pub has_opening_hours: bool,
    pub google_maps_uri: Option<String>,
    pub primary_type: Option<String>,
    /// Human label for `primary_type`; empty when the upstream omitted it.
    pub primary_type_display_name: String,
    pub address_components: Vec<AddressComponent>,
}

impl PlaceRecord {
    /// The display name, falling back to the place identifier.
    #[must_use]
    pub fn resolved_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    /// First address component tagged with `tag`.
    #[must_use]
    pub fn address_component(&self, tag: &str) -> Option<&AddressComponent> {
        self.address_components.iter().find(|c| c.has_type(tag))
    }
}

/// A single reason a place was surfaced.
///
/// Serialized as the human label so persisted results stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "Website")]
    MissingWebsite,
    #[serde(rename = "Phone number")]
    MissingPhone,
    #[serde(rename = "Hours")]
    MissingHours,
    #[serde(rename = "Has emoji in name")]
    EmojiInName,
}

impl Flag {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Flag::MissingWebsite => "Website",
            Flag::MissingPhone => "Phone number",
            Flag::MissingHours => "Hours",
            Flag::EmojiInName => "Has emoji in name",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A flagged place. `flags` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "missing")]
    pub flags: Vec<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
    #[serde(default)]
    pub primary_type_display_name: String,
}

/// One cached scan: the classified results for a rounded location and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    pub cache_key: String,
    pub results: Vec<ClassificationResult>,
}

impl CacheEntry {
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}
