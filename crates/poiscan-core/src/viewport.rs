//! Map viewport extraction from a Google Maps URL.
//!
//! Maps URLs carry the viewport as `…/@<lat>,<lng>,<zoom>z/…`. The zoom
//! segment is optional (satellite views use `<meters>m` instead), in which
//! case the zoom is reported as unknown.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::LatLng;

/// `@lat,lng` with an optional `,{zoom}z` suffix.
static VIEWPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@([-+]?[\d.]+),([-+]?[\d.]+)(?:,([\d.]+)z)?").expect("valid regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewportError {
    #[error("could not find an \"@lat,lng\" segment in {0}")]
    MissingCenter(String),

    #[error("invalid coordinate \"{value}\": {reason}")]
    InvalidCoordinate { value: String, reason: String },
}

/// Center and zoom of the visible map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: Option<f64>,
}

/// Parse the viewport out of a Maps URL.
///
/// # Errors
///
/// Returns [`ViewportError::MissingCenter`] when the URL has no `@lat,lng`
/// segment, or [`ViewportError::InvalidCoordinate`] when either coordinate is
/// not a finite number within range.
pub fn parse_viewport(url: &str) -> Result<Viewport, ViewportError> {
    let caps = VIEWPORT_RE
        .captures(url)
        .ok_or_else(|| ViewportError::MissingCenter(url.to_string()))?;

    let lat = parse_coordinate(&caps[1], 90.0)?;
    let lng = parse_coordinate(&caps[2], 180.0)?;

    let zoom = caps
        .get(3)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|z| z.is_finite());

    Ok(Viewport {
        center: LatLng::new(lat, lng),
        zoom,
    })
}

fn parse_coordinate(raw: &str, limit: f64) -> Result<f64, ViewportError> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| ViewportError::InvalidCoordinate {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
    if !value.is_finite() || value.abs() > limit {
        return Err(ViewportError::InvalidCoordinate {
            value: raw.to_string(),
            reason: format!("outside ±{limit}"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_center_and_zoom() {
        let vp = parse_viewport(
            "https://www.google.com/maps/@40.7127753,-74.0059728,15.5z/data=!3m1!4b1",
        )
        .unwrap();
        assert!((vp.center.lat - 40.712_775_3).abs() < 1e-9);
        assert!((vp.center.lng + 74.005_972_8).abs() < 1e-9);
        assert_eq!(vp.zoom, Some(15.5));
    }

    #[test]
    fn place_urls_keep_the_viewport_segment() {
        let vp = parse_viewport(
            "https://www.google.com/maps/place/Joe's/@51.5,-0.12,17z/data=!4m6",
        )
        .unwrap();
        assert_eq!(vp.center, LatLng::new(51.5, -0.12));
        assert_eq!(vp.zoom, Some(17.0));
    }

    #[test]
    fn meter_scale_means_unknown_zoom() {
        let vp = parse_viewport("https://www.google.com/maps/@48.85,2.35,3000m/data=!3m1!1e3")
            .unwrap();
        assert_eq!(vp.zoom, None);
    }

    #[test]
    fn explicit_plus_sign_keeps_the_zoom() {
        let vp = parse_viewport("https://www.google.com/maps/@+40.7,-74.0,15z").unwrap();
        assert_eq!(vp.center, LatLng::new(40.7, -74.0));
        assert_eq!(vp.zoom, Some(15.0));

        let vp = parse_viewport("https://www.google.com/maps/@40.7,+74.0,12z").unwrap();
        assert_eq!(vp.zoom, Some(12.0));
    }

    #[test]
    fn missing_center_is_an_error() {
        let err = parse_viewport("https://www.google.com/maps").unwrap_err();
        assert!(matches!(err, ViewportError::MissingCenter(_)));
    }

    #[test]
    fn garbage_coordinate_is_an_error() {
        let err = parse_viewport("https://www.google.com/maps/@1.2.3,4,10z").unwrap_err();
        assert!(matches!(err, ViewportError::InvalidCoordinate { .. }));
    }

    #[test]
    fn out_of_range_latitude_is_an_error() {
        let err = parse_viewport("https://www.google.com/maps/@91.0,4.0,10z").unwrap_err();
        assert!(matches!(err, ViewportError::InvalidCoordinate { .. }));
    }
}
