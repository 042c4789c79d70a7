use thiserror::Error;

use poiscan_core::ViewportError;
use poiscan_places::PlacesError;

/// Failures of the key/value persistence substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode value for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a scan attempt was aborted. Every variant is terminal for that
/// attempt; an empty result list is not an error.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot determine location: {0}")]
    LocationUnavailable(#[from] ViewportError),

    #[error("no Places API key is stored")]
    MissingApiKey,

    #[error("nearby search failed: {0}")]
    Upstream(#[from] PlacesError),

    #[error("could not persist scan state: {0}")]
    Storage(#[from] StoreError),
}
