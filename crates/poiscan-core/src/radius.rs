//! Search radius derived from the map zoom level.

/// Zoom level at which the search radius equals [`BASE_RADIUS_M`].
pub const BASE_ZOOM: f64 = 10.0;
/// Radius in meters at [`BASE_ZOOM`]; also the value for an unknown zoom.
pub const BASE_RADIUS_M: u32 = 50_000;
pub const MIN_RADIUS_M: u32 = 100;
pub const MAX_RADIUS_M: u32 = 50_000;

/// Returns the nearby-search radius in meters for a map zoom level.
///
/// Each zoom step in halves the radius: `50000 * 2^(10 - zoom)`, rounded and
/// clamped to `[100, 50000]`. `None` or a non-finite zoom yields
/// [`BASE_RADIUS_M`].
#[must_use]
pub fn radius_for_zoom(zoom: Option<f64>) -> u32 {
    let Some(zoom) = zoom.filter(|z| z.is_finite()) else {
        return BASE_RADIUS_M;
    };

    let raw = f64::from(BASE_RADIUS_M) * 2f64.powf(BASE_ZOOM - zoom);
    let rounded = raw.round().clamp(f64::from(MIN_RADIUS_M), f64::from(MAX_RADIUS_M));
    // Clamped to [100, 50000] above, so the cast is lossless.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let radius = rounded as u32;
    radius
}
