pub mod app_config;
pub mod config;
pub mod radius;
pub mod types;
pub mod viewport;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use radius::{radius_for_zoom, BASE_RADIUS_M, BASE_ZOOM, MAX_RADIUS_M, MIN_RADIUS_M};
pub use types::{AddressComponent, CacheEntry, ClassificationResult, Flag, LatLng, PlaceRecord};
pub use viewport::{parse_viewport, Viewport, ViewportError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
