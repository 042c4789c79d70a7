//! Request body for `places:searchNearby`.

use serde::Serialize;

use poiscan_core::LatLng;

/// `{"locationRestriction": {...}, "rankPreference": "DISTANCE", "excludedTypes": [...]}`
///
/// `excluded_types` is omitted from the body entirely when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub location_restriction: LocationRestriction,
    pub rank_preference: RankPreference,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_types: Vec<String>,
}

impl NearbySearchRequest {
    /// Distance-ranked search of a circle, excluding the given type tags.
    #[must_use]
    pub fn new(center: LatLng, radius_m: u32, excluded_types: Vec<String>) -> Self {
        Self {
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: Center {
                        latitude: center.lat,
                        longitude: center.lng,
                    },
                    radius: radius_m,
                },
            },
            rank_preference: RankPreference::Distance,
            excluded_types,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRestriction {
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: Center,
    /// Meters.
    pub radius: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankPreference {
    Distance,
}
