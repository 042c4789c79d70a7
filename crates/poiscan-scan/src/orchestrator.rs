//! One manual scan, end to end.
//!
//! ```text
//! scan ──► credential ──► radius ──► cache key ──► fresh entry?
//!                                                   │yes        │no
//!                                                   ▼           ▼
//!                                        CacheAvailable    live fetch ──► Completed
//!                                                   │
//!                                   resolve(UseCache | FetchFresh)
//! ```
//!
//! A live fetch makes exactly one upstream call, classifies the normalized
//! records against the whitelist, and writes the result into the cache.
//! Scans never touch the suppression lists.

use chrono::{DateTime, TimeDelta, Utc};

use poiscan_core::{parse_viewport, radius_for_zoom, CacheEntry, ClassificationResult, LatLng};
use poiscan_places::{normalize_response, NearbySearch, NearbySearchRequest};

use crate::cache::{cache_key, ResultCache, DEFAULT_MAX_AGE_MS};
use crate::classify::classify;
use crate::clock::Clock;
use crate::credentials::Credentials;
use crate::error::{ScanError, StoreError};
use crate::store::KeyValueStore;
use crate::suppression::SuppressionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    AwaitingExternalResult,
}

/// Holds the state at [`ScanState::AwaitingExternalResult`] and returns it
/// to `Idle` on drop, including when the scan future is dropped mid-call.
struct AwaitingGuard<'a>(&'a mut ScanState);

impl<'a> AwaitingGuard<'a> {
    fn enter(state: &'a mut ScanState) -> Self {
        *state = ScanState::AwaitingExternalResult;
        Self(state)
    }
}

impl Drop for AwaitingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = ScanState::Idle;
    }
}

/// The caller's answer when a fresh cached result exists for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    UseCache,
    FetchFresh,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultSource {
    Live,
    Cache { timestamp: DateTime<Utc> },
}

/// Final output of a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub results: Vec<ClassificationResult>,
    pub source: ResultSource,
    pub center: LatLng,
    pub radius_m: u32,
    pub cache_key: String,
}

impl ScanReport {
    fn from_cache(entry: CacheEntry) -> Self {
        Self {
            center: entry.center(),
            radius_m: entry.radius,
            source: ResultSource::Cache {
                timestamp: entry.timestamp,
            },
            cache_key: entry.cache_key,
            results: entry.results,
        }
    }
}

/// A scan paused on a fresh cache hit, waiting for a [`CacheDecision`].
#[derive(Debug, Clone, PartialEq)]
pub struct PendingScan {
    pub center: LatLng,
    pub radius_m: u32,
    pub cache_key: String,
    pub cached: CacheEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanStep {
    CacheAvailable(PendingScan),
    Completed(ScanReport),
}

pub struct ScanOrchestrator<S, K, C> {
    search: S,
    credentials: Credentials<K>,
    suppression: SuppressionStore<K>,
    cache: ResultCache<K>,
    clock: C,
    max_age: TimeDelta,
    state: ScanState,
}

impl<S, K, C> ScanOrchestrator<S, K, C>
where
    S: NearbySearch,
    K: KeyValueStore + Clone,
    C: Clock,
{
    /// Loads the suppression lists and the result cache from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn new(search: S, store: K, clock: C) -> Result<Self, StoreError> {
        let suppression = SuppressionStore::load(store.clone())?;
        let cache = ResultCache::load(store.clone())?;
        Ok(Self {
            search,
            credentials: Credentials::new(store),
            suppression,
            cache,
            clock,
            max_age: TimeDelta::milliseconds(DEFAULT_MAX_AGE_MS),
            state: ScanState::Idle,
        })
    }

    /// Overrides how long a cached result is offered for reuse.
    #[must_use]
    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = max_age;
        self
    }

    /// Parses `url` for the viewport and scans it.
    ///
    /// # Errors
    ///
    /// [`ScanError::LocationUnavailable`] when the URL carries no usable
    /// center, otherwise as [`scan`](Self::scan).
    pub async fn scan_url(&mut self, url: &str) -> Result<ScanStep, ScanError> {
        let viewport = parse_viewport(url)?;
        self.scan(viewport.center, viewport.zoom).await
    }

    /// Runs a scan at `center`. A fresh cache hit is handed back as
    /// [`ScanStep::CacheAvailable`] without any network call; finish it
    /// with [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// - [`ScanError::MissingApiKey`] when no key is stored.
    /// - [`ScanError::Upstream`] when the nearby search fails.
    /// - [`ScanError::Storage`] when the store cannot be read or written.
    pub async fn scan(&mut self, center: LatLng, zoom: Option<f64>) -> Result<ScanStep, ScanError> {
        let api_key = self.require_api_key()?;
        let radius_m = radius_for_zoom(zoom);
        let key = cache_key(center.lat, center.lng, radius_m);

        if let Some(entry) = self.cache.find_fresh(&key, self.clock.now(), self.max_age) {
            tracing::info!(
                cache_key = %key,
                cached_at = %entry.timestamp,
                "fresh cached result available"
            );
            return Ok(ScanStep::CacheAvailable(PendingScan {
                center,
                radius_m,
                cache_key: key,
                cached: entry.clone(),
            }));
        }

        let report = self.fetch_live(&api_key, center, radius_m, key).await?;
        Ok(ScanStep::Completed(report))
    }

    /// Completes a scan that stopped on a fresh cache hit.
    ///
    /// # Errors
    ///
    /// [`CacheDecision::UseCache`] never fails. [`CacheDecision::FetchFresh`]
    /// fails as a live [`scan`](Self::scan) does.
    pub async fn resolve(
        &mut self,
        pending: PendingScan,
        decision: CacheDecision,
    ) -> Result<ScanReport, ScanError> {
        match decision {
            CacheDecision::UseCache => {
                tracing::info!(
                    cache_key = %pending.cache_key,
                    results = pending.cached.results.len(),
                    "using cached scan result"
                );
                Ok(ScanReport::from_cache(pending.cached))
            }
            CacheDecision::FetchFresh => {
                let api_key = self.require_api_key()?;
                self.fetch_live(&api_key, pending.center, pending.radius_m, pending.cache_key)
                    .await
            }
        }
    }

    async fn fetch_live(
        &mut self,
        api_key: &str,
        center: LatLng,
        radius_m: u32,
        key: String,
    ) -> Result<ScanReport, ScanError> {
        let request = NearbySearchRequest::new(
            center,
            radius_m,
            self.suppression.blacklisted_types().to_vec(),
        );

        let awaiting = AwaitingGuard::enter(&mut self.state);
        let outcome = self.search.search_nearby(api_key, &request).await;
        drop(awaiting);

        let body = outcome.inspect_err(|e| {
            tracing::warn!(cache_key = %key, error = %e, "nearby search failed");
        })?;

        let places = normalize_response(&body);
        let results = classify(&places, self.suppression.whitelist());

        self.cache.put(CacheEntry {
            timestamp: self.clock.now(),
            lat: center.lat,
            lng: center.lng,
            radius: radius_m,
            cache_key: key.clone(),
            results: results.clone(),
        })?;

        tracing::info!(
            cache_key = %key,
            radius_m,
            places = places.len(),
            flagged = results.len(),
            "scan completed"
        );

        Ok(ScanReport {
            results,
            source: ResultSource::Live,
            center,
            radius_m,
            cache_key: key,
        })
    }

    fn require_api_key(&self) -> Result<String, ScanError> {
        self.credentials.api_key()?.ok_or(ScanError::MissingApiKey)
    }

    /// A cached entry by list position, presented as a scan report.
    #[must_use]
    pub fn cached_report(&self, index: usize) -> Option<ScanReport> {
        self.cache.get(index).cloned().map(ScanReport::from_cache)
    }

    #[must_use]
    pub fn state(&self) -> ScanState {
        self.state
    }

    #[must_use]
    pub fn max_age(&self) -> TimeDelta {
        self.max_age
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials<K> {
        &self.credentials
    }

    #[must_use]
    pub fn suppression(&self) -> &SuppressionStore<K> {
        &self.suppression
    }

    /// Whitelist and blacklist edits. Blacklist changes apply from the next
    /// scan on; neither list purges cached results.
    pub fn suppression_mut(&mut self) -> &mut SuppressionStore<K> {
        &mut self.suppression
    }

    #[must_use]
    pub fn cache(&self) -> &ResultCache<K> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResultCache<K> {
        &mut self.cache
    }
}
