//! Stock symbol lookup
//!
//! This crate turns partial user input into ticker suggestions and renders
//! company profiles for the chosen symbol. It includes:
//!
//! - A read-only ticker catalog (built-in or loaded from JSON)
//! - Ranked substring matching over symbols and company names
//! - A provider fallback that resolves unknown input as a literal ticker
//! - Market data providers (Yahoo Finance, Finnhub) behind a TTL cache
//! - Plain-text and table rendering of profiles and business segments
//! - An interactive session driven by `/`-prefixed commands
//!
//! # Example
//!
//! ```rust,ignore
//! use lookup_core::{Catalog, LookupConfig, SuggestionEngine, provider};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LookupConfig::default();
//!     let provider = provider::from_config(&config)?;
//!     let engine = SuggestionEngine::from_config(Catalog::shared(), provider, &config);
//!
//!     for entry in engine.suggest("micro").await {
//!         println!("{}", entry.label());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod profile;
pub mod provider;
pub mod segments;
pub mod suggest;

// Re-export main types for convenience
pub use bot::{Command, LookupSession, Reply, SessionConfig};
pub use cache::CachedProvider;
pub use catalog::{Catalog, CatalogEntry};
pub use config::{DataProvider, LookupConfig, LookupConfigBuilder};
pub use engine::SuggestionEngine;
pub use error::{LookupError, Result};
pub use interface::{Formatter, FormatterFactory, OutputStyle};
pub use profile::{CompanyProfile, format_large_number, format_price};
pub use provider::MarketDataProvider;
pub use segments::{Segment, SegmentTable};
pub use suggest::{DEFAULT_SUGGESTION_LIMIT, SuggestOutcome, suggest};
