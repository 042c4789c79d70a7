//! The scan-classify-cache pipeline.
//!
//! [`ScanOrchestrator`] ties together the radius estimate, the
//! [`ResultCache`], the upstream [`poiscan_places::NearbySearch`] call, the
//! [`classify()`] rules, and the [`SuppressionStore`]. All persisted state goes
//! through a [`KeyValueStore`].

pub mod cache;
pub mod classify;
pub mod clock;
pub mod credentials;
mod emoji;
pub mod error;
pub mod orchestrator;
pub mod store;
pub mod suppression;

pub use cache::{cache_key, is_fresh, ResultCache, CACHE_CAPACITY, DEFAULT_MAX_AGE_MS};
pub use classify::{classify, classify_place, is_address_fragment};
pub use clock::{Clock, SystemClock};
pub use credentials::Credentials;
pub use emoji::contains_emoji;
pub use error::{ScanError, StoreError};
pub use orchestrator::{
    CacheDecision, PendingScan, ResultSource, ScanOrchestrator, ScanReport, ScanState, ScanStep,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use suppression::{SuppressionStore, DEFAULT_BLACKLIST};
