//! Flagging rules for nearby-search results.
//!
//! A place is surfaced when it lacks a website, phone number, or structured
//! opening hours, or when its name contains emoji. Places whose name is
//! just their street address are dropped before any check runs, and
//! whitelisted places are removed last.

use std::collections::BTreeSet;

use poiscan_core::{ClassificationResult, Flag, PlaceRecord};

use crate::emoji::contains_emoji;

/// Classifies `places` in input order, returning only flagged,
/// non-whitelisted results.
#[must_use]
pub fn classify(
    places: &[PlaceRecord],
    whitelist: &BTreeSet<String>,
) -> Vec<ClassificationResult> {
    let flagged: Vec<ClassificationResult> = places.iter().filter_map(classify_place).collect();
    let flagged_count = flagged.len();

    let results: Vec<ClassificationResult> = flagged
        .into_iter()
        .filter(|r| !whitelist.contains(&r.id))
        .collect();

    tracing::debug!(
        places = places.len(),
        flagged = flagged_count,
        whitelisted = flagged_count - results.len(),
        "classified places"
    );
    results
}

/// Applies the per-place rules. Returns `None` for address pins and for
/// places with nothing to flag. Does not consult the whitelist.
#[must_use]
pub fn classify_place(place: &PlaceRecord) -> Option<ClassificationResult> {
    if is_address_fragment(place) {
        tracing::debug!(id = %place.id, name = place.resolved_name(), "skipping address pin");
        return None;
    }

    let name = place.resolved_name();
    let mut flags = Vec::new();

    if is_blank(place.website_uri.as_deref()) {
        flags.push(Flag::MissingWebsite);
    }
    if is_blank(place.national_phone_number.as_deref()) {
        flags.push(Flag::MissingPhone);
    }
    if !place.has_opening_hours {
        flags.push(Flag::MissingHours);
    }
    if contains_emoji(name) {
        flags.push(Flag::EmojiInName);
    }

    if flags.is_empty() {
        return None;
    }

    Some(ClassificationResult {
        id: place.id.clone(),
        name: name.to_string(),
        uri: place.google_maps_uri.clone(),
        flags,
        primary_type: place.primary_type.clone(),
        primary_type_display_name: place.primary_type_display_name.clone(),
    })
}

/// Whether the place's name is nothing more than its route, or its street
/// number followed by its route, in any short/long text combination.
#[must_use]
pub fn is_address_fragment(place: &PlaceRecord) -> bool {
    let Some(route) = place.address_component("route") else {
        return false;
    };
    let name = place.resolved_name();

    let routes: Vec<&str> = [route.short_text.as_deref(), route.long_text.as_deref()]
        .into_iter()
        .flatten()
        .collect();

    if routes.contains(&name) {
        return true;
    }

    let Some(number) = place.address_component("street_number") else {
        return false;
    };

    [number.short_text.as_deref(), number.long_text.as_deref()]
        .into_iter()
        .flatten()
        .any(|n| routes.iter().any(|r| name == format!("{n} {r}")))
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
