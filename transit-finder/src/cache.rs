//! Caching layer for provider responses.
//!
//! Line lookups dominate provider traffic: every search issues one per
//! nearby stop, and neighbouring searches hit the same stops again. Line
//! ids and stop names are stable, so those responses are cached by
//! `(query, city)`. Nearby searches are keyed by a floating-point center
//! and are not cached.
//!
//! Only successful responses are cached. An empty result is a success.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{Category, Point};
use crate::provider::{GeoProvider, LineDetail, Poi, ProviderError, RawLine};

/// Cache key: (query, city).
type QueryKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries, per kind of lookup.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 2000,
        }
    }
}

fn build<V>(config: &CacheConfig) -> MokaCache<QueryKey, V>
where
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

fn key(query: &str, city: &str) -> QueryKey {
    (query.to_string(), city.to_string())
}

/// Provider with caching.
///
/// Wraps any [`GeoProvider`] and is one itself, so the engine does not
/// know whether it is talking to a cache.
pub struct CachedProvider<P> {
    inner: P,
    geocodes: MokaCache<QueryKey, Option<Point>>,
    lines: MokaCache<QueryKey, Arc<Vec<RawLine>>>,
    details: MokaCache<QueryKey, Arc<Option<LineDetail>>>,
}

impl<P: GeoProvider> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            geocodes: build(config),
            lines: build(config),
            details: build(config),
        }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.geocodes.entry_count() + self.lines.entry_count() + self.details.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.geocodes.invalidate_all();
        self.lines.invalidate_all();
        self.details.invalidate_all();
    }
}

impl<P: GeoProvider> GeoProvider for CachedProvider<P> {
    async fn geocode(&self, address: &str, city: &str) -> Result<Option<Point>, ProviderError> {
        let key = key(address, city);
        if let Some(cached) = self.geocodes.get(&key).await {
            return Ok(cached);
        }

        let point = self.inner.geocode(address, city).await?;
        self.geocodes.insert(key, point).await;
        Ok(point)
    }

    async fn search_nearby(
        &self,
        center: Point,
        radius_m: u32,
        category: Category,
        city: &str,
    ) -> Result<Vec<Poi>, ProviderError> {
        self.inner
            .search_nearby(center, radius_m, category, city)
            .await
    }

    async fn search_lines_by_station(
        &self,
        keyword: &str,
        city: &str,
    ) -> Result<Vec<RawLine>, ProviderError> {
        let key = key(keyword, city);
        if let Some(cached) = self.lines.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let lines = self.inner.search_lines_by_station(keyword, city).await?;
        self.lines.insert(key, Arc::new(lines.clone())).await;
        Ok(lines)
    }

    async fn line_detail(
        &self,
        line_id: &str,
        city: &str,
    ) -> Result<Option<LineDetail>, ProviderError> {
        let key = key(line_id, city);
        if let Some(cached) = self.details.get(&key).await {
            return Ok(cached.as_ref().clone());
        }

        let detail = self.inner.line_detail(line_id, city).await?;
        self.details.insert(key, Arc::new(detail.clone())).await;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::{FakeProvider, detail, pt, raw_line};

    fn cached(fake: FakeProvider) -> CachedProvider<FakeProvider> {
        CachedProvider::new(fake, &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 2000);
    }

    #[tokio::test]
    async fn line_lookups_are_cached_per_city() {
        let provider = cached(FakeProvider::new().with_lines(
            "凤起路",
            vec![raw_line("M1", "地铁1号线", None)],
            0,
        ));

        let first = provider.search_lines_by_station("凤起路", "杭州").await.unwrap();
        let second = provider.search_lines_by_station("凤起路", "杭州").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.inner().line_lookups(), 1);

        provider.search_lines_by_station("凤起路", "上海").await.unwrap();
        assert_eq!(provider.inner().line_lookups(), 2);
    }

    #[tokio::test]
    async fn empty_results_are_cached() {
        let provider = cached(FakeProvider::new());

        assert!(provider.line_detail("nope", "杭州").await.unwrap().is_none());
        assert!(provider.line_detail("nope", "杭州").await.unwrap().is_none());
        assert_eq!(provider.inner().detail_lookups(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let provider = cached(FakeProvider::new().with_failing_lines("凤起路", 0));

        assert!(provider.search_lines_by_station("凤起路", "杭州").await.is_err());
        assert!(provider.search_lines_by_station("凤起路", "杭州").await.is_err());
        assert_eq!(provider.inner().line_lookups(), 2);
    }

    #[tokio::test]
    async fn details_and_geocodes_pass_through() {
        let provider = cached(
            FakeProvider::new()
                .with_geocode("西湖", pt(120.14, 30.25))
                .with_detail("M1", detail(&[(120.1, 30.1), (120.2, 30.2)], &["A", "B"], None), 0),
        );

        assert_eq!(
            provider.geocode("西湖", "杭州").await.unwrap(),
            Some(pt(120.14, 30.25))
        );
        let detail = provider.line_detail("M1", "杭州").await.unwrap().unwrap();
        assert_eq!(detail.stops.len(), 2);

        provider.line_detail("M1", "杭州").await.unwrap();
        assert_eq!(provider.inner().detail_lookups(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let provider = cached(FakeProvider::new());
        provider.search_lines_by_station("A", "杭州").await.unwrap();
        provider.invalidate_cache();
        provider.search_lines_by_station("A", "杭州").await.unwrap();
        assert_eq!(provider.inner().line_lookups(), 2);
    }
}
