//! Finnhub API client for company profiles and quotes

use crate::catalog::CatalogEntry;
use crate::error::{LookupError, Result};
use crate::profile::CompanyProfile;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://finnhub.io/api/v1";

// free tier
const DEFAULT_RATE_LIMIT: NonZeroU32 = match NonZeroU32::new(60) {
    Some(limit) => limit,
    None => NonZeroU32::MIN,
};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Response of `/stock/profile2`; every field is absent for unknown symbols
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinnhubProfile {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub finnhub_industry: Option<String>,
    /// Market capitalization in millions
    #[serde(default)]
    pub market_capitalization: Option<f64>,
}

impl FinnhubProfile {
    fn is_empty(&self) -> bool {
        self.ticker.as_deref().is_none_or(str::is_empty)
    }
}

/// Response of `/quote`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinnhubQuote {
    /// Current price
    #[serde(rename = "c", default)]
    pub current: f64,
    /// Previous close
    #[serde(rename = "pc", default)]
    pub previous_close: f64,
    /// Quote time (UNIX timestamp)
    #[serde(rename = "t", default)]
    pub timestamp: i64,
}

/// Finnhub client with rate limiting
pub struct FinnhubClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

/// Builder for FinnhubClient
#[derive(Debug)]
pub struct FinnhubClientBuilder {
    api_key: String,
    base_url: String,
    rate_limit: u32,
    timeout: Duration,
}

impl FinnhubClientBuilder {
    /// Requests per minute (free tier: 60, premium: 300+)
    pub fn rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the API base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FinnhubClient> {
        let quota = Quota::per_minute(NonZeroU32::new(self.rate_limit).unwrap_or(DEFAULT_RATE_LIMIT));
        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(FinnhubClient {
            client,
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }
}

impl FinnhubClient {
    /// Create a new Finnhub client with rate limiting
    ///
    /// # Arguments
    /// * `api_key` - Finnhub API key
    /// * `rate_limit` - Requests per minute (free tier: 60, premium: 300+)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Result<Self> {
        Self::builder(api_key).rate_limit(rate_limit).build()
    }

    /// Start building a client
    pub fn builder(api_key: impl Into<String>) -> FinnhubClientBuilder {
        FinnhubClientBuilder {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT.get(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create from environment variable FINNHUB_API_KEY with default rate limit
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FINNHUB_API_KEY").map_err(|_| {
            LookupError::ConfigError("FINNHUB_API_KEY environment variable not set".to_string())
        })?;

        Self::new(api_key, DEFAULT_RATE_LIMIT.get())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, symbol: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::FinnhubError(format!("Finnhub request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LookupError::RateLimitExceeded {
                provider: "Finnhub".to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::FinnhubError(format!(
                "Finnhub API error {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::FinnhubError(format!("Failed to parse Finnhub response: {e}")))
    }

    /// Get the company profile; `None` when Finnhub does not know the symbol
    pub async fn get_profile(&self, symbol: &str) -> Result<Option<FinnhubProfile>> {
        let profile: FinnhubProfile = self.get_json("stock/profile2", symbol).await?;
        Ok((!profile.is_empty()).then_some(profile))
    }

    /// Get the latest quote
    pub async fn get_quote(&self, symbol: &str) -> Result<FinnhubQuote> {
        self.get_json("quote", symbol).await
    }
}

fn profile_from_parts(
    symbol: &str,
    profile: FinnhubProfile,
    quote: Option<FinnhubQuote>,
) -> CompanyProfile {
    // Finnhub reports an unknown quote as all zeros
    let quote = quote.filter(|q| q.current > 0.0);

    CompanyProfile {
        name: profile.name.filter(|n| !n.is_empty()),
        exchange: profile.exchange.filter(|e| !e.is_empty()),
        currency: profile.currency.filter(|c| !c.is_empty()),
        industry: profile.finnhub_industry.filter(|i| !i.is_empty()),
        market_cap: profile.market_capitalization.map(|millions| millions * 1e6),
        price: quote.as_ref().map(|q| q.current),
        fetched_at: quote
            .and_then(|q| DateTime::from_timestamp(q.timestamp, 0))
            .unwrap_or_else(Utc::now),
        ..CompanyProfile::new(symbol)
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    fn name(&self) -> &'static str {
        "finnhub"
    }

    async fn lookup_by_symbol(&self, ticker: &str) -> Result<Option<CatalogEntry>> {
        Ok(self.get_profile(ticker).await?.map(|profile| {
            let symbol = profile.ticker.unwrap_or_else(|| ticker.to_string());
            let name = profile.name.unwrap_or_else(|| symbol.clone());
            CatalogEntry::new(&symbol, name)
        }))
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let symbol = symbol.trim().to_uppercase();
        let profile = self
            .get_profile(&symbol)
            .await?
            .ok_or_else(|| LookupError::NotFound(symbol.clone()))?;

        let quote = match self.get_quote(&symbol).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::warn!("Quote for {} unavailable: {}", symbol, e);
                None
            }
        };

        Ok(profile_from_parts(&symbol, profile, quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finnhub_client_creation() {
        let client = FinnhubClient::new("test_key", 60).unwrap();
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.base_url, BASE_URL);
    }

    #[test]
    fn test_zero_rate_limit_falls_back() {
        let client = FinnhubClient::builder("test_key")
            .rate_limit(0)
            .base_url("http://localhost:9/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:9/api");
    }

    #[test]
    fn test_empty_profile_means_unknown() {
        let profile: FinnhubProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.is_empty());

        let profile: FinnhubProfile = serde_json::from_str(
            r#"{"ticker":"AAPL","name":"Apple Inc","exchange":"NASDAQ NMS - GLOBAL MARKET",
                "currency":"USD","finnhubIndustry":"Technology","marketCapitalization":2950000.5}"#,
        )
        .unwrap();
        assert!(!profile.is_empty());
        assert_eq!(profile.finnhub_industry.as_deref(), Some("Technology"));
    }

    #[test]
    fn test_profile_from_parts() {
        let profile = FinnhubProfile {
            ticker: Some("AAPL".to_string()),
            name: Some("Apple Inc".to_string()),
            currency: Some("USD".to_string()),
            market_capitalization: Some(2_950_000.0),
            ..Default::default()
        };
        let quote = FinnhubQuote {
            current: 189.5,
            previous_close: 188.0,
            timestamp: 1_700_000_000,
        };

        let result = profile_from_parts("AAPL", profile, Some(quote));
        assert_eq!(result.name.as_deref(), Some("Apple Inc"));
        assert_eq!(result.price, Some(189.5));
        assert_eq!(result.market_cap, Some(2.95e12));
        assert_eq!(result.fetched_at.timestamp(), 1_700_000_000);
        assert_eq!(result.display_market_cap(), "$2.95T");
    }

    #[test]
    fn test_zero_quote_is_ignored() {
        let profile = FinnhubProfile {
            ticker: Some("XYZ".to_string()),
            ..Default::default()
        };
        let result = profile_from_parts("XYZ", profile, Some(FinnhubQuote::default()));
        assert_eq!(result.price, None);
        assert_eq!(result.name, None);
    }

    #[tokio::test]
    #[ignore] // Requires network access and FINNHUB_API_KEY
    async fn test_lookup_by_symbol() {
        let client = FinnhubClient::from_env().unwrap();
        let entry = client.lookup_by_symbol("AAPL").await.unwrap();
        assert_eq!(entry.map(|e| e.symbol), Some("AAPL".to_string()));
        assert!(client.lookup_by_symbol("ZZZZZZZZ").await.unwrap().is_none());
    }
}
