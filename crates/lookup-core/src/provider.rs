//! Market data provider abstraction

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{FinnhubClient, YahooFinanceClient};
use crate::cache::CachedProvider;
use crate::catalog::CatalogEntry;
use crate::config::{DataProvider, LookupConfig};
use crate::error::{LookupError, Result};
use crate::profile::CompanyProfile;

/// External source of symbol lookups and company profiles
///
/// Implementations report an unknown symbol as `Ok(None)` from
/// [`lookup_by_symbol`](MarketDataProvider::lookup_by_symbol); errors are
/// reserved for transport and provider failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Resolve a literal ticker to a catalog entry
    async fn lookup_by_symbol(&self, ticker: &str) -> Result<Option<CatalogEntry>>;

    /// Fetch quote and profile data for a symbol
    async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile>;
}

/// Build the provider selected by `config`, wrapped in a TTL cache
pub fn from_config(config: &LookupConfig) -> Result<Arc<dyn MarketDataProvider>> {
    config.validate()?;

    let provider: Arc<dyn MarketDataProvider> = match config.default_provider {
        DataProvider::Yahoo => Arc::new(CachedProvider::new(
            YahooFinanceClient::new(),
            config.cache_ttl,
        )),
        DataProvider::Finnhub => {
            let api_key = config.finnhub_api_key.clone().ok_or_else(|| {
                LookupError::ConfigError("FINNHUB_API_KEY is not set".to_string())
            })?;
            let client = FinnhubClient::builder(api_key)
                .rate_limit(config.rate_limit_per_minute)
                .timeout(config.request_timeout)
                .build()?;
            Arc::new(CachedProvider::new(client, config.cache_ttl))
        }
    };

    tracing::debug!("Using {} provider", provider.name());
    Ok(provider)
}
