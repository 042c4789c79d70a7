//! Normalization from raw `searchNearby` JSON to [`PlaceRecord`].
//!
//! The response is read field by field from `serde_json::Value` rather than
//! through a strict struct so that one odd place (a numeric phone, a display
//! name in an older shape) degrades to "missing" instead of failing the
//! whole scan.

use serde_json::Value;

use poiscan_core::{AddressComponent, PlaceRecord};

/// Extracts and normalizes the place list from a response body.
///
/// The list may live under `places` (current API) or `results` (legacy
/// shape). When neither is an array the scan simply found nothing. Entries
/// without a string `id` are skipped.
#[must_use]
pub fn normalize_response(body: &Value) -> Vec<PlaceRecord> {
    let raw = body
        .get("places")
        .and_then(Value::as_array)
        .or_else(|| body.get("results").and_then(Value::as_array));

    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.iter()
        .filter_map(|place| {
            let record = normalize_place(place);
            if record.is_none() {
                tracing::debug!(place = %place, "skipping place without an id");
            }
            record
        })
        .collect()
}

/// Normalizes one place object. Returns `None` when it has no string `id`.
#[must_use]
pub fn normalize_place(place: &Value) -> Option<PlaceRecord> {
    let id = place.get("id")?.as_str()?.to_string();

    Some(PlaceRecord {
        id,
        display_name: place.get("displayName").and_then(resolve_display_name),
        website_uri: string_field(place, "websiteUri"),
        national_phone_number: string_field(place, "nationalPhoneNumber"),
        has_opening_hours: place
            .get("currentOpeningHours")
            .is_some_and(|v| v.is_object() || v.is_array()),
        google_maps_uri: string_field(place, "googleMapsUri"),
        primary_type: string_field(place, "primaryType"),
        primary_type_display_name: place
            .get("primaryTypeDisplayName")
            .and_then(|d| d.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        address_components: place
            .get("addressComponents")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().map(normalize_address_component).collect())
            .unwrap_or_default(),
    })
}

/// Display name resolution order: plain string, then `{text}`, then `{name}`.
fn resolve_display_name(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    value
        .get("text")
        .and_then(Value::as_str)
        .or_else(|| value.get("name").and_then(Value::as_str))
        .map(str::to_string)
}

fn normalize_address_component(component: &Value) -> AddressComponent {
    AddressComponent {
        types: component
            .get("types")
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        short_text: string_field(component, "shortText"),
        long_text: string_field(component, "longText"),
    }
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}
