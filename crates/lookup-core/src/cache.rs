//! Caching layer for provider responses to reduce API calls

use async_trait::async_trait;
use cached::{Cached, TimedCache};
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::profile::CompanyProfile;
use crate::provider::MarketDataProvider;

/// Cache key for provider requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Stock symbol
    pub symbol: String,
    /// Provider operation
    pub endpoint: &'static str,
}

impl CacheKey {
    /// Create a new cache key; the symbol is uppercased
    pub fn new(symbol: &str, endpoint: &'static str) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            endpoint,
        }
    }
}

/// Thread-safe TTL cache
pub struct TtlCache<V> {
    cache: Arc<RwLock<TimedCache<CacheKey, V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a value from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a value into the cache
    pub async fn insert(&self, key: CacheKey, value: V) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get or fetch a value using the provided fetcher function
    ///
    /// If the value exists in cache, it's returned immediately.
    /// Otherwise, the fetcher function is called and a successful result is cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: CacheKey, fetcher: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!("Cache hit for key: {:?}", key);
            return Ok(value);
        }

        tracing::debug!("Cache miss for key: {:?}", key);

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;

        Ok(value)
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Provider wrapper that caches profiles and successful symbol lookups
///
/// Unknown symbols and errors are not cached, so a later call retries.
pub struct CachedProvider<P> {
    inner: P,
    profiles: TtlCache<CompanyProfile>,
    lookups: TtlCache<CatalogEntry>,
}

impl<P: MarketDataProvider> CachedProvider<P> {
    /// Wrap `inner` with caches that expire after `ttl`
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            profiles: TtlCache::new(ttl),
            lookups: TtlCache::new(ttl),
        }
    }
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn lookup_by_symbol(&self, ticker: &str) -> Result<Option<CatalogEntry>> {
        let key = CacheKey::new(ticker, "lookup");
        if let Some(entry) = self.lookups.get(&key).await {
            tracing::debug!("Cache hit for key: {:?}", key);
            return Ok(Some(entry));
        }

        let resolved = self.inner.lookup_by_symbol(ticker).await?;
        if let Some(entry) = &resolved {
            self.lookups.insert(key, entry.clone()).await;
        }
        Ok(resolved)
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let key = CacheKey::new(symbol, "profile");
        self.profiles
            .get_or_fetch(key, || self.inner.fetch_profile(symbol))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::provider::MockMarketDataProvider;

    #[test]
    fn test_cache_key_creation() {
        let key = CacheKey::new(" aapl", "profile");
        assert_eq!(key.symbol, "AAPL");
        assert_eq!(key.endpoint, "profile");
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", "profile");
        let value = CompanyProfile::new("AAPL");

        cache.insert(key.clone(), value.clone()).await;

        assert_eq!(cache.get(&key).await, Some(value));
    }

    #[tokio::test]
    async fn test_cache_get_or_fetch() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", "profile");
        let value = CompanyProfile::new("AAPL");

        let mut call_count = 0;
        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, String>(value.clone()) }
            })
            .await
            .unwrap();
        assert_eq!(result, value);
        assert_eq!(call_count, 1);

        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, String>(value.clone()) }
            })
            .await
            .unwrap();
        assert_eq!(result, value);
        assert_eq!(call_count, 1);
    }

    #[tokio::test]
    async fn test_cache_keys_ignore_case() {
        let cache = TtlCache::new(Duration::from_secs(60));
        assert!(cache.is_empty().await);

        for symbol in ["AAPL", "msft", "MSFT"] {
            cache
                .insert(CacheKey::new(symbol, "profile"), CompanyProfile::new(symbol))
                .await;
        }
        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&CacheKey::new("Msft", "profile")).await.is_some());
        assert!(cache.get(&CacheKey::new("MSFT", "lookup")).await.is_none());
    }

    #[tokio::test]
    async fn test_cached_provider_caches_profiles() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_fetch_profile()
            .times(1)
            .returning(|symbol| Ok(CompanyProfile::new(symbol)));

        let provider = CachedProvider::new(mock, Duration::from_secs(60));
        let first = provider.fetch_profile("MSFT").await.unwrap();
        let second = provider.fetch_profile("msft").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cached_provider_does_not_cache_misses() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_lookup_by_symbol()
            .times(2)
            .returning(|_| Ok(None));
        mock.expect_fetch_profile()
            .times(2)
            .returning(|symbol| Err(LookupError::NotFound(symbol.to_string())));

        let provider = CachedProvider::new(mock, Duration::from_secs(60));
        assert!(provider.lookup_by_symbol("ZZZZ").await.unwrap().is_none());
        assert!(provider.lookup_by_symbol("ZZZZ").await.unwrap().is_none());
        assert!(provider.fetch_profile("ZZZZ").await.is_err());
        assert!(provider.fetch_profile("ZZZZ").await.is_err());
    }

    #[tokio::test]
    async fn test_cached_provider_caches_hits() {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_lookup_by_symbol()
            .times(1)
            .returning(|ticker| Ok(Some(CatalogEntry::new(ticker, "Shopify Inc."))));

        let provider = CachedProvider::new(mock, Duration::from_secs(60));
        let first = provider.lookup_by_symbol("SHOP").await.unwrap();
        let second = provider.lookup_by_symbol("SHOP").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.map(|e| e.symbol), Some("SHOP".to_string()));
    }
}
