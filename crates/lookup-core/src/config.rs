//! Configuration for lookup operations

use crate::error::{LookupError, Result};
use crate::suggest::DEFAULT_SUGGESTION_LIMIT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Data provider for quotes and symbol lookups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataProvider {
    /// Yahoo Finance (default, no API key required)
    #[default]
    Yahoo,
    /// Finnhub (requires API key)
    Finnhub,
}

impl fmt::Display for DataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yahoo => write!(f, "yahoo"),
            Self::Finnhub => write!(f, "finnhub"),
        }
    }
}

impl FromStr for DataProvider {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "finnhub" => Ok(Self::Finnhub),
            other => Err(LookupError::ConfigError(format!("Unknown provider: {other}"))),
        }
    }
}

/// Configuration for suggestion and profile lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Data provider used for fallback lookups and profiles
    pub default_provider: DataProvider,

    /// Maximum number of suggestions returned per query
    pub suggestion_limit: usize,

    /// Resolve unmatched queries against the provider as literal tickers
    pub fallback_enabled: bool,

    /// Cache TTL for profiles and resolved lookups
    pub cache_ttl: Duration,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum provider requests per minute
    pub rate_limit_per_minute: u32,

    /// Finnhub API key (optional)
    pub finnhub_api_key: Option<String>,

    /// JSON catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,

    /// JSON segment table replacing the built-in one
    pub segments_path: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            default_provider: DataProvider::Yahoo,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            fallback_enabled: true,
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(30),
            rate_limit_per_minute: 60,
            finnhub_api_key: None,
            catalog_path: None,
            segments_path: None,
        }
    }
}

impl LookupConfig {
    /// Create a new configuration builder
    pub fn builder() -> LookupConfigBuilder {
        LookupConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_provider == DataProvider::Finnhub && self.finnhub_api_key.is_none() {
            return Err(LookupError::ConfigError(
                "Finnhub API key required when using Finnhub provider".to_string(),
            ));
        }

        if self.suggestion_limit == 0 {
            return Err(LookupError::ConfigError(
                "suggestion_limit must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(LookupError::ConfigError(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for LookupConfig
#[derive(Debug, Default)]
pub struct LookupConfigBuilder {
    default_provider: Option<DataProvider>,
    suggestion_limit: Option<usize>,
    fallback_enabled: Option<bool>,
    cache_ttl: Option<Duration>,
    request_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
    finnhub_api_key: Option<String>,
    catalog_path: Option<PathBuf>,
    segments_path: Option<PathBuf>,
}

impl LookupConfigBuilder {
    /// Set the default data provider
    pub fn default_provider(mut self, provider: DataProvider) -> Self {
        self.default_provider = Some(provider);
        self
    }

    /// Set the suggestion limit
    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = Some(limit);
        self
    }

    /// Enable or disable the provider fallback
    pub fn fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = Some(enabled);
        self
    }

    /// Set cache TTL
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set provider rate limit (requests per minute)
    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    /// Set Finnhub API key
    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    /// Load Finnhub API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("FINNHUB_API_KEY") {
            self.finnhub_api_key = Some(key);
        }
        self
    }

    /// Set a catalog file
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Set a segment table file
    pub fn segments_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.segments_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<LookupConfig> {
        let defaults = LookupConfig::default();

        let config = LookupConfig {
            default_provider: self.default_provider.unwrap_or(defaults.default_provider),
            suggestion_limit: self.suggestion_limit.unwrap_or(defaults.suggestion_limit),
            fallback_enabled: self.fallback_enabled.unwrap_or(defaults.fallback_enabled),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
            finnhub_api_key: self.finnhub_api_key,
            catalog_path: self.catalog_path,
            segments_path: self.segments_path,
        };

        config.validate()?;
        Ok(config)
    }
}
