//! Suggestion engine: local catalog matching with an optional provider fallback

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::LookupConfig;
use crate::provider::MarketDataProvider;
use crate::suggest::{self, DEFAULT_SUGGESTION_LIMIT, SuggestOutcome};

/// Produces suggestion lists for user queries
///
/// The catalog is shared read-only. When the catalog has no match and the
/// fallback is enabled, the query is resolved once against the provider as a
/// literal ticker. Provider failures never reach the caller; they are logged
/// and reported as "no suggestions".
#[derive(Clone)]
pub struct SuggestionEngine {
    catalog: Arc<Catalog>,
    provider: Option<Arc<dyn MarketDataProvider>>,
    limit: usize,
    fallback_enabled: bool,
}

impl SuggestionEngine {
    /// Engine over `catalog` with no provider fallback
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            provider: None,
            limit: DEFAULT_SUGGESTION_LIMIT,
            fallback_enabled: false,
        }
    }

    /// Engine configured from `config`, falling back to `provider`
    pub fn from_config(
        catalog: Arc<Catalog>,
        provider: Arc<dyn MarketDataProvider>,
        config: &LookupConfig,
    ) -> Self {
        Self {
            catalog,
            provider: Some(provider),
            limit: config.suggestion_limit,
            fallback_enabled: config.fallback_enabled,
        }
    }

    /// Attach a provider and enable the fallback
    pub fn with_provider(mut self, provider: Arc<dyn MarketDataProvider>) -> Self {
        self.provider = Some(provider);
        self.fallback_enabled = true;
        self
    }

    /// Set the maximum number of suggestions
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Enable or disable the provider fallback
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    /// The shared catalog
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The fallback provider, if any
    pub fn provider(&self) -> Option<&Arc<dyn MarketDataProvider>> {
        self.provider.as_ref()
    }

    /// Maximum number of suggestions returned
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run only the local filter
    pub fn suggest_local(&self, query: &str) -> SuggestOutcome {
        suggest::suggest(query, &self.catalog, self.limit)
    }

    /// Suggestions for `query`, trying the provider when nothing matches locally
    pub async fn suggest(&self, query: &str) -> Vec<CatalogEntry> {
        match self.suggest_local(query) {
            SuggestOutcome::Matches(entries) => entries,
            SuggestOutcome::NoLocalMatch { candidate } => {
                self.fallback(&candidate).await.into_iter().collect()
            }
        }
    }

    async fn fallback(&self, candidate: &str) -> Option<CatalogEntry> {
        if !self.fallback_enabled || self.limit == 0 {
            return None;
        }
        let provider = self.provider.as_ref()?;

        tracing::debug!("No local match for {}, asking {}", candidate, provider.name());
        match provider.lookup_by_symbol(candidate).await {
            Ok(Some(entry)) => {
                tracing::info!("Resolved {} via {}", entry.symbol, provider.name());
                Some(entry)
            }
            Ok(None) => {
                tracing::debug!("{} does not know {}", provider.name(), candidate);
                None
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} does not know {}: {}", provider.name(), candidate, e);
                None
            }
            Err(e) => {
                tracing::warn!("Fallback lookup for {} failed: {}", candidate, e);
                None
            }
        }
    }

    /// Exact symbol lookup in the catalog, ignoring case
    pub fn resolve(&self, symbol: &str) -> Option<CatalogEntry> {
        self.catalog.get(symbol).cloned()
    }
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("catalog_len", &self.catalog.len())
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("limit", &self.limit)
            .field("fallback_enabled", &self.fallback_enabled)
            .finish()
    }
}
