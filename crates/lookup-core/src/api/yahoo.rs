//! Yahoo Finance API client

use crate::catalog::CatalogEntry;
use crate::error::{LookupError, Result};
use crate::profile::CompanyProfile;
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
pub struct YahooFinanceClient {}

/// Latest quote for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Search hit from the ticker search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| LookupError::YahooFinanceError(e.to_string()))
    }

    /// Get the latest quote for a symbol
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let provider = Self::connector()?;

        let response = provider
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| LookupError::YahooFinanceError(e.to_string()))?;

        let quote = response
            .last_quote()
            .map_err(|e| LookupError::YahooFinanceError(e.to_string()))?;

        Ok(Quote {
            symbol: symbol.to_string(),
            timestamp: DateTime::from_timestamp(quote.timestamp as i64, 0)
                .unwrap_or_else(Utc::now),
            close: quote.close,
        })
    }

    /// Search tickers and company names
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let provider = Self::connector()?;

        let result = provider
            .search_ticker(query)
            .await
            .map_err(|e| LookupError::YahooFinanceError(e.to_string()))?;

        Ok(result
            .quotes
            .into_iter()
            .map(|item| SearchHit {
                name: preferred_name(&item.long_name, &item.short_name),
                symbol: item.symbol,
                exchange: item.exchange,
            })
            .collect())
    }
}

fn preferred_name(long_name: &str, short_name: &str) -> String {
    if long_name.trim().is_empty() {
        short_name.trim().to_string()
    } else {
        long_name.trim().to_string()
    }
}

/// The hit whose symbol equals `ticker`, ignoring case
fn exact_hit(hits: Vec<SearchHit>, ticker: &str) -> Option<SearchHit> {
    hits.into_iter()
        .find(|hit| hit.symbol.eq_ignore_ascii_case(ticker))
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn lookup_by_symbol(&self, ticker: &str) -> Result<Option<CatalogEntry>> {
        let hits = self.search(ticker).await?;
        Ok(exact_hit(hits, ticker).map(|hit| CatalogEntry::new(&hit.symbol, hit.name)))
    }

    async fn fetch_profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let symbol = symbol.trim().to_uppercase();
        let quote = self.get_quote(&symbol).await?;

        // The search endpoint is the only keyless source of a display name
        let hit = match self.search(&symbol).await {
            Ok(hits) => exact_hit(hits, &symbol),
            Err(e) => {
                tracing::debug!("Name lookup for {} failed: {}", symbol, e);
                None
            }
        };

        Ok(CompanyProfile {
            name: hit.as_ref().map(|h| h.name.clone()).filter(|n| !n.is_empty()),
            exchange: hit.map(|h| h.exchange).filter(|e| !e.is_empty()),
            price: Some(quote.close),
            fetched_at: quote.timestamp,
            ..CompanyProfile::new(symbol)
        })
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for YahooFinanceClient {
    fn clone(&self) -> Self {
        Self::new()
    }
}
