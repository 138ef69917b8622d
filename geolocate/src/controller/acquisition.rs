//! The acquisition controller.
//!
//! Orchestrates one location request end to end:
//!
//! ```text
//! acquire_location
//!     │
//!     ├── capability check ──────────────► Unsupported
//!     ├── cache lookup ──────────────────► origin = cache
//!     ├── rate limit ────────────────────► RateLimited
//!     ├── LocationSource (raced by timer) ► PermissionDenied / SourceUnavailable / TimedOut
//!     ├── validate ──────────────────────► InvalidCoordinate
//!     ├── GeocodingResolver (non-fatal)
//!     └── cache write
//! ```
//!
//! # Concurrency
//!
//! Both public operations take `&mut self`, so one controller instance has at
//! most one request in flight. Callers that share a controller wrap it in a
//! `tokio::sync::Mutex`; overlapping callers are serialized, not
//! deduplicated.

use tokio::time::Instant;

use super::types::{
    AcquireOptions, AcquisitionStage, Origin, PlaceStatus, PrivacyMode, ProgressFn,
    ResolutionResult,
};
use crate::cache::{CacheEntry, CacheStats, LocationCache, CURRENT_LOCATION_KEY};
use crate::config::ResolverConfig;
use crate::coord::validate;
use crate::error::ErrorKind;
use crate::provider::{AsyncHttpClient, AsyncReqwestClient, ProviderError};
use crate::resolver::GeocodingResolver;
use crate::source::{LocationSource, PositionRequest};

/// Top-level entry point for location resolution.
pub struct AcquisitionController<S: LocationSource, C: AsyncHttpClient> {
    source: S,
    resolver: GeocodingResolver<C>,
    cache: LocationCache,
    config: ResolverConfig,
    /// Start of the most recent attempt that reached the location source.
    last_attempt: Option<Instant>,
    /// Manual retries since the last success.
    retry_count: u32,
}

impl<S: LocationSource> AcquisitionController<S, AsyncReqwestClient> {
    /// Creates a controller that talks to the configured providers over
    /// HTTPS.
    pub fn with_default_client(source: S, config: ResolverConfig) -> Result<Self, ProviderError> {
        let http_client = AsyncReqwestClient::with_timeout(config.http_timeout)?;
        Ok(Self::new(source, http_client, config))
    }
}

impl<S: LocationSource, C: AsyncHttpClient> AcquisitionController<S, C> {
    /// Creates a controller whose resolver follows `config.provider_order`.
    pub fn new(source: S, http_client: C, config: ResolverConfig) -> Self {
        let resolver = GeocodingResolver::from_kinds(http_client, &config.provider_order);
        Self::with_resolver(source, resolver, config)
    }

    /// Creates a controller around a pre-built resolver.
    ///
    /// `config.provider_order` is ignored in favour of the resolver's own
    /// provider list.
    pub fn with_resolver(
        source: S,
        resolver: GeocodingResolver<C>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            source,
            resolver,
            cache: LocationCache::new(config.cache_expiry),
            config,
            last_attempt: None,
            retry_count: 0,
        }
    }

    /// Settings this controller was built with.
    ///
    /// For a controller built by [`with_resolver`](Self::with_resolver),
    /// `provider_order` is whatever the caller passed and does not describe
    /// the resolver; use [`provider_names`](Self::provider_names) instead.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Names of the geocoding providers actually consulted, in order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.resolver.provider_names()
    }

    /// Manual retries since the last success.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached location.
    pub fn clear_cache(&mut self) {
        tracing::debug!("Location cache cleared");
        self.cache.clear();
    }

    /// Restore the full retry budget.
    pub fn reset_retries(&mut self) {
        self.retry_count = 0;
    }

    /// Acquire the current location.
    ///
    /// Uses the initial timeout. Never panics and never returns an error:
    /// every outcome is encoded in the [`ResolutionResult`].
    pub async fn acquire_location(
        &mut self,
        options: AcquireOptions,
        progress: Option<ProgressFn<'_>>,
    ) -> ResolutionResult {
        let timeout = self.config.initial_timeout;
        let result = self.acquire(options, progress, timeout).await;
        if result.succeeded {
            self.retry_count = 0;
        }
        result
    }

    /// Retry after a failure, with exponential backoff.
    ///
    /// Waits `min(1000 * 2^(attempt-1), 5000)` ms, then acquires with
    /// `force_refresh` and the retry timeout. Once more than `max_retries`
    /// retries have been made since the last success, returns a
    /// non-retryable [`ErrorKind::TimedOut`] without contacting the source.
    pub async fn retry_location(
        &mut self,
        options: AcquireOptions,
        progress: Option<ProgressFn<'_>>,
    ) -> ResolutionResult {
        self.retry_count = self.retry_count.saturating_add(1);
        let attempt = self.retry_count;

        if attempt > self.config.max_retries {
            tracing::warn!(
                attempt,
                max_retries = self.config.max_retries,
                "Location retry budget exhausted"
            );
            return ResolutionResult::failure(
                ErrorKind::TimedOut,
                format!(
                    "Maximum retry attempts ({}) exceeded; enter your location manually",
                    self.config.max_retries
                ),
                false,
            );
        }

        let delay = ResolverConfig::retry_backoff(attempt);
        tracing::debug!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Retrying location acquisition"
        );
        tokio::time::sleep(delay).await;

        let options = AcquireOptions {
            force_refresh: true,
            ..options
        };
        let timeout = self.config.retry_timeout;
        let result = self.acquire(options, progress, timeout).await;
        if result.succeeded {
            self.retry_count = 0;
        }
        result
    }

    async fn acquire(
        &mut self,
        options: AcquireOptions,
        progress: Option<ProgressFn<'_>>,
        timeout: std::time::Duration,
    ) -> ResolutionResult {
        report(progress, AcquisitionStage::Permission);

        if !self.source.is_available() {
            tracing::info!("Location capability not available on this device");
            return ResolutionResult::failure(
                ErrorKind::Unsupported,
                "Location services are not supported",
                false,
            );
        }

        if !options.force_refresh {
            if let Some(result) = self.cached_result(options.privacy_mode) {
                report(progress, AcquisitionStage::Complete);
                return result;
            }
        }

        let now = Instant::now();
        if let Some(last) = self.last_attempt {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.config.rate_limit_interval {
                let wait = self.config.rate_limit_interval - elapsed;
                tracing::debug!(
                    wait_ms = wait.as_millis() as u64,
                    "Location request rate limited"
                );
                return ResolutionResult::failure(
                    ErrorKind::RateLimited,
                    format!("Too many requests; wait {} ms", wait.as_millis()),
                    true,
                );
            }
        }
        self.last_attempt = Some(now);

        report(progress, AcquisitionStage::Acquiring);
        let request = PositionRequest {
            timeout,
            high_accuracy: true,
        };

        // Dropping the source future on expiry discards any late answer.
        let coordinate =
            match tokio::time::timeout(timeout, self.source.current_position(request)).await {
                Ok(Ok(coordinate)) => coordinate,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Location source failed");
                    return ResolutionResult::failure(e.kind(), e.to_string(), e.is_retryable());
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = timeout.as_millis() as u64,
                        "Location source timed out"
                    );
                    return ResolutionResult::failure(
                        ErrorKind::TimedOut,
                        format!("No position within {} ms", timeout.as_millis()),
                        true,
                    );
                }
            };

        if !validate(coordinate.latitude, coordinate.longitude) {
            tracing::warn!(
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "Location source reported an invalid coordinate"
            );
            return ResolutionResult::failure(
                ErrorKind::InvalidCoordinate,
                format!("Location source reported invalid coordinate {}", coordinate),
                false,
            );
        }

        report(progress, AcquisitionStage::Acquired);
        report(progress, AcquisitionStage::Geocoding);

        let result = match self.resolver.resolve(&coordinate).await {
            Ok(place) => ResolutionResult::located(
                coordinate,
                Some(place),
                PlaceStatus::Resolved,
                Origin::NetworkProvider,
            ),
            Err(e) => {
                tracing::info!(error = %e, "Continuing with coordinates only");
                let reason = e.to_string();
                let located = ResolutionResult::located(
                    coordinate,
                    None,
                    PlaceStatus::Unresolved {
                        reason: reason.clone(),
                    },
                    Origin::Device,
                );
                match options.privacy_mode {
                    PrivacyMode::Precise => located,
                    PrivacyMode::CityOnly => located.missing_required_place(&reason),
                }
            }
        };

        self.cache.put(
            CURRENT_LOCATION_KEY,
            CacheEntry::new(coordinate, result.place.clone()),
        );

        tracing::info!(
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            accuracy_m = coordinate.accuracy,
            city = result.city(),
            origin = ?result.origin,
            "Location acquired"
        );
        report(progress, AcquisitionStage::Complete);
        result
    }

    /// A usable cache hit for the requested privacy mode.
    ///
    /// City-only requests need a cached place name; a coordinate-only entry
    /// sends them to the location source instead.
    fn cached_result(&mut self, privacy_mode: PrivacyMode) -> Option<ResolutionResult> {
        let entry = self.cache.get(CURRENT_LOCATION_KEY)?;
        let has_city = entry.place.as_ref().is_some_and(|p| p.has_city());

        if privacy_mode == PrivacyMode::CityOnly && !has_city {
            tracing::debug!("Cached location has no city, refreshing for city-only request");
            return None;
        }

        tracing::debug!(
            age_ms = entry.age(Instant::now()).as_millis() as u64,
            "Serving location from cache"
        );
        let status = if entry.place.is_some() {
            PlaceStatus::Resolved
        } else {
            PlaceStatus::NotAttempted
        };
        Some(ResolutionResult::located(
            entry.coordinate,
            entry.place,
            status,
            Origin::Cache,
        ))
    }
}

fn report(progress: Option<ProgressFn<'_>>, stage: AcquisitionStage) {
    if let Some(callback) = progress {
        callback(stage, stage.progress());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::coord::Coordinate;
    use crate::provider::{MockAsyncHttpClient, ProviderKind};
    use crate::source::SourceError;

    const BIGDATACLOUD: &str = "https://api.bigdatacloud.net";
    const NOMINATIM: &str = "https://nominatim.openstreetmap.org";

    enum Step {
        Reply(Result<Coordinate, SourceError>),
        After(Duration, Result<Coordinate, SourceError>),
    }

    /// Location source that plays back a fixed script.
    #[derive(Clone)]
    struct ScriptedSource {
        available: bool,
        steps: Arc<Mutex<VecDeque<Step>>>,
        requests: Arc<Mutex<Vec<PositionRequest>>>,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                available: true,
                steps: Arc::new(Mutex::new(steps.into())),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::new(Vec::new())
            }
        }

        fn requests(&self) -> Vec<PositionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl LocationSource for ScriptedSource {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn current_position(
            &self,
            request: PositionRequest,
        ) -> Result<Coordinate, SourceError> {
            self.requests.lock().unwrap().push(request);
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(Step::Reply(reply)) => reply,
                Some(Step::After(delay, reply)) => {
                    tokio::time::sleep(delay).await;
                    reply
                }
                None => Err(SourceError::PositionUnavailable("script exhausted".into())),
            }
        }
    }

    fn madrid() -> Coordinate {
        Coordinate::new(40.4168, -3.7038).unwrap().with_accuracy(25.0)
    }

    fn ok() -> Step {
        Step::Reply(Ok(madrid()))
    }

    fn unavailable() -> Step {
        Step::Reply(Err(SourceError::PositionUnavailable("no fix".into())))
    }

    fn geocoding_ok() -> MockAsyncHttpClient {
        MockAsyncHttpClient::new().route_json(
            BIGDATACLOUD,
            r#"{"city": "Madrid", "principalSubdivision": "Community of Madrid", "countryName": "Spain"}"#,
        )
    }

    fn geocoding_down() -> MockAsyncHttpClient {
        MockAsyncHttpClient::new()
    }

    fn config() -> ResolverConfig {
        ResolverConfig::default()
            .with_provider_order(vec![ProviderKind::BigDataCloud, ProviderKind::Nominatim])
    }

    fn controller(
        source: &ScriptedSource,
        http: &MockAsyncHttpClient,
    ) -> AcquisitionController<ScriptedSource, MockAsyncHttpClient> {
        AcquisitionController::new(source.clone(), http.clone(), config())
    }

    #[test]
    fn test_provider_names_follow_resolver() {
        let source = ScriptedSource::new(Vec::new());
        let ctl = controller(&source, &geocoding_ok());
        assert_eq!(ctl.provider_names(), vec!["bigdatacloud", "nominatim"]);

        let resolver = GeocodingResolver::from_kinds(geocoding_ok(), &[ProviderKind::Photon]);
        let ctl = AcquisitionController::with_resolver(source, resolver, config());
        assert_eq!(ctl.provider_names(), vec!["photon"]);
        assert_eq!(ctl.config().provider_order.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_device() {
        let source = ScriptedSource::unavailable();
        let mut ctl = controller(&source, &geocoding_ok());

        let result = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(!result.succeeded);
        assert_eq!(result.error_kind, Some(ErrorKind::Unsupported));
        assert!(!result.retryable);
        assert!(source.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_resolves_place_and_caches() {
        let source = ScriptedSource::new(vec![ok()]);
        let http = geocoding_ok();
        let mut ctl = controller(&source, &http);

        let first = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(first.succeeded);
        assert_eq!(first.origin, Origin::NetworkProvider);
        assert_eq!(first.city(), Some("Madrid"));
        assert_eq!(first.place_status, PlaceStatus::Resolved);
        assert_eq!(first.coordinate.unwrap().accuracy, Some(25.0));
        assert!(first.error_kind.is_none());

        // Immediately again: served from cache, rate limiter not consulted
        let second = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(second.succeeded);
        assert_eq!(second.origin, Origin::Cache);
        assert_eq!(second.city(), Some("Madrid"));
        assert_eq!(source.requests().len(), 1);
        assert_eq!(http.calls().len(), 1);
        assert_eq!(ctl.cache_stats().hits, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_expires() {
        let source = ScriptedSource::new(vec![ok(), ok()]);
        let mut ctl = controller(&source, &geocoding_ok());

        ctl.acquire_location(AcquireOptions::precise(), None).await;
        tokio::time::advance(ctl.config().cache_expiry + Duration::from_millis(1)).await;

        let result = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(result.origin, Origin::NetworkProvider);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_force_refresh_and_clear_cache_bypass_cache() {
        let source = ScriptedSource::new(vec![ok(), ok(), ok()]);
        let mut ctl = controller(&source, &geocoding_ok());

        ctl.acquire_location(AcquireOptions::precise(), None).await;

        tokio::time::advance(Duration::from_secs(1)).await;
        let forced = ctl
            .acquire_location(AcquireOptions::precise().force_refresh(), None)
            .await;
        assert_eq!(forced.origin, Origin::NetworkProvider);

        tokio::time::advance(Duration::from_secs(1)).await;
        ctl.clear_cache();
        let cleared = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(cleared.origin, Origin::NetworkProvider);
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_blocks_rapid_attempts() {
        let source = ScriptedSource::new(vec![unavailable(), ok()]);
        let mut ctl = controller(&source, &geocoding_ok());

        let first = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(first.error_kind, Some(ErrorKind::SourceUnavailable));

        tokio::time::advance(Duration::from_millis(999)).await;
        let second = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(!second.succeeded);
        assert_eq!(second.error_kind, Some(ErrorKind::RateLimited));
        assert!(second.retryable);
        assert_eq!(source.requests().len(), 1);

        // Exactly one interval after the first attempt is allowed
        tokio::time::advance(Duration::from_millis(1)).await;
        let third = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(third.succeeded);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_failures_are_classified() {
        let source = ScriptedSource::new(vec![
            Step::Reply(Err(SourceError::PermissionDenied)),
            unavailable(),
            Step::Reply(Err(SourceError::Timeout)),
        ]);
        let mut ctl = controller(&source, &geocoding_ok());

        let denied = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(denied.error_kind, Some(ErrorKind::PermissionDenied));
        assert!(!denied.retryable);

        tokio::time::advance(Duration::from_secs(1)).await;
        let unavailable = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(unavailable.error_kind, Some(ErrorKind::SourceUnavailable));
        assert!(unavailable.retryable);

        tokio::time::advance(Duration::from_secs(1)).await;
        let timed_out = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(timed_out.error_kind, Some(ErrorKind::TimedOut));
        assert!(timed_out.retryable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_wins_and_late_answer_is_discarded() {
        let source =
            ScriptedSource::new(vec![Step::After(Duration::from_secs(15), Ok(madrid()))]);
        let http = geocoding_ok();
        let mut ctl = controller(&source, &http);

        let started = Instant::now();
        let result = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(result.error_kind, Some(ErrorKind::TimedOut));
        assert!(result.retryable);
        assert!(result.coordinate.is_none());
        assert_eq!(started.elapsed(), Duration::from_secs(10));

        // The late coordinate never reached the cache or the resolver
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(http.calls().is_empty());
        assert_eq!(ctl.cache_stats().hits, 0);
        assert_eq!(source.requests()[0].timeout, Duration::from_secs(10));
        assert!(source.requests()[0].high_accuracy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_device_coordinate() {
        let source =
            ScriptedSource::new(vec![Step::Reply(Ok(Coordinate::unchecked(200.0, 200.0)))]);
        let http = geocoding_ok();
        let mut ctl = controller(&source, &http);

        let result = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(!result.succeeded);
        assert_eq!(result.error_kind, Some(ErrorKind::InvalidCoordinate));
        assert!(!result.retryable);
        assert!(http.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_geocoding_failure_is_not_fatal_in_precise_mode() {
        let source = ScriptedSource::new(vec![ok()]);
        let http = geocoding_down();
        let mut ctl = controller(&source, &http);

        let result = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(result.succeeded);
        assert_eq!(result.coordinate.unwrap().latitude, 40.4168);
        assert!(result.place.is_none());
        assert!(result.error_kind.is_none());
        assert!(!result.is_partial());
        assert_eq!(result.origin, Origin::Device);
        assert!(matches!(result.place_status, PlaceStatus::Unresolved { .. }));
        assert_eq!(http.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_geocoding_failure_is_partial_in_city_only_mode() {
        let source = ScriptedSource::new(vec![ok()]);
        let mut ctl = controller(&source, &geocoding_down());

        let result = ctl.acquire_location(AcquireOptions::city_only(), None).await;
        assert!(result.succeeded);
        assert!(result.is_partial());
        assert_eq!(result.error_kind, Some(ErrorKind::GeocodingFailed));
        assert!(result.retryable);
        assert!(result.coordinate.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_city_only_skips_cached_entry_without_place() {
        let source = ScriptedSource::new(vec![ok(), ok()]);
        let http = MockAsyncHttpClient::new()
            .route(
                BIGDATACLOUD,
                Err(ProviderError::Timeout("bigdatacloud".into())),
            )
            .route_json(NOMINATIM, r#"{"address": {}}"#);
        let mut ctl = controller(&source, &http);

        let precise = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(precise.place.is_none());

        // A precise request is happy with the coordinate-only entry
        let cached = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(cached.origin, Origin::Cache);
        assert_eq!(cached.place_status, PlaceStatus::NotAttempted);

        tokio::time::advance(Duration::from_secs(1)).await;
        let city_only = ctl.acquire_location(AcquireOptions::city_only(), None).await;
        assert_ne!(city_only.origin, Origin::Cache);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_stages_in_order() {
        let source = ScriptedSource::new(vec![ok()]);
        let mut ctl = controller(&source, &geocoding_ok());
        let seen = Mutex::new(Vec::new());
        let sink = |stage: AcquisitionStage, pct: u8| seen.lock().unwrap().push((stage, pct));

        ctl.acquire_location(AcquireOptions::precise(), Some(&sink)).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (AcquisitionStage::Permission, 10),
                (AcquisitionStage::Acquiring, 30),
                (AcquisitionStage::Acquired, 60),
                (AcquisitionStage::Geocoding, 80),
                (AcquisitionStage::Complete, 100),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_backoff_and_timeout() {
        let source = ScriptedSource::new(vec![unavailable(), unavailable(), ok()]);
        let mut ctl = controller(&source, &geocoding_ok());

        ctl.acquire_location(AcquireOptions::precise(), None).await;

        let started = Instant::now();
        let first = ctl.retry_location(AcquireOptions::precise(), None).await;
        assert!(!first.succeeded);
        assert_eq!(started.elapsed(), Duration::from_millis(1000));
        assert_eq!(ctl.retry_count(), 1);

        let started = Instant::now();
        let second = ctl.retry_location(AcquireOptions::precise(), None).await;
        assert!(second.succeeded);
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
        assert_eq!(ctl.retry_count(), 0);

        let requests = source.requests();
        assert_eq!(requests[0].timeout, Duration::from_secs(10));
        assert_eq!(requests[1].timeout, Duration::from_secs(20));
        assert_eq!(requests[2].timeout, Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_uses_longer_timeout() {
        let slow = || Step::After(Duration::from_secs(15), Ok(madrid()));
        let source = ScriptedSource::new(vec![slow(), slow()]);
        let mut ctl = controller(&source, &geocoding_ok());

        let first = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert_eq!(first.error_kind, Some(ErrorKind::TimedOut));

        let retried = ctl.retry_location(AcquireOptions::precise(), None).await;
        assert!(retried.succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_budget_exhaustion() {
        let source = ScriptedSource::new(Vec::new());
        let mut ctl = AcquisitionController::new(
            source.clone(),
            geocoding_ok(),
            config().with_max_retries(2),
        );

        for _ in 0..2 {
            let result = ctl.retry_location(AcquireOptions::precise(), None).await;
            assert_eq!(result.error_kind, Some(ErrorKind::SourceUnavailable));
            assert!(result.retryable);
        }

        let started = Instant::now();
        let exhausted = ctl.retry_location(AcquireOptions::precise(), None).await;
        assert!(!exhausted.succeeded);
        assert_eq!(exhausted.error_kind, Some(ErrorKind::TimedOut));
        assert!(!exhausted.retryable);
        assert!(exhausted.error_message.unwrap().contains("Maximum retry attempts"));
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(source.requests().len(), 2);

        ctl.reset_retries();
        assert_eq!(ctl.retry_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_success_resets_retry_counter() {
        let source = ScriptedSource::new(vec![unavailable(), ok()]);
        let mut ctl = controller(&source, &geocoding_ok());

        ctl.retry_location(AcquireOptions::precise(), None).await;
        assert_eq!(ctl.retry_count(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        let result = ctl.acquire_location(AcquireOptions::precise(), None).await;
        assert!(result.succeeded);
        assert_eq!(ctl.retry_count(), 0);
    }
}
