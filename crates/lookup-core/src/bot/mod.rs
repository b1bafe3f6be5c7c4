//! Interactive lookup session
//!
//! Typing text shows suggestions, `/pick <n>` selects one and renders its
//! profile, `/quote <symbol>` renders a profile directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use lookup_core::bot::{LookupSession, Reply, SessionConfig};
//!
//! let mut session = LookupSession::new(engine, formatter, segments, SessionConfig::default());
//! match session.process_input("micro").await? {
//!     Reply::Text(text) => println!("{text}"),
//!     Reply::Exit => return Ok(()),
//! }
//! ```

pub mod commands;

use crate::catalog::CatalogEntry;
use crate::engine::SuggestionEngine;
use crate::error::{LookupError, Result};
use crate::interface::Formatter;
use crate::segments::SegmentTable;
use std::sync::Arc;

pub use commands::Command;

/// Message shown when a profile cannot be fetched
pub const FETCH_ERROR_MESSAGE: &str =
    "Error fetching data. Please check the stock symbol and try again.";

/// Configuration for the lookup session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Welcome message
    pub welcome_message: String,
    /// Prompt prefix
    pub prompt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome_message: "Stock Lookup - type a symbol or company name, /help for commands"
                .to_string(),
            prompt: ">>> ".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create a builder
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}

/// Builder for SessionConfig
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    welcome_message: Option<String>,
    prompt: Option<String>,
}

impl SessionConfigBuilder {
    /// Set welcome message
    pub fn welcome_message(mut self, msg: impl Into<String>) -> Self {
        self.welcome_message = Some(msg.into());
        self
    }

    /// Set prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Build the config
    pub fn build(self) -> SessionConfig {
        let defaults = SessionConfig::default();
        SessionConfig {
            welcome_message: self.welcome_message.unwrap_or(defaults.welcome_message),
            prompt: self.prompt.unwrap_or(defaults.prompt),
        }
    }
}

/// Outcome of processing one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the user
    Text(String),
    /// The user asked to leave
    Exit,
}

/// One user's lookup session
pub struct LookupSession {
    engine: SuggestionEngine,
    formatter: Box<dyn Formatter>,
    segments: Arc<SegmentTable>,
    config: SessionConfig,
    suggestions: Vec<CatalogEntry>,
    active_symbol: Option<String>,
}

impl LookupSession {
    /// Create a new session
    pub fn new(
        engine: SuggestionEngine,
        formatter: Box<dyn Formatter>,
        segments: Arc<SegmentTable>,
        config: SessionConfig,
    ) -> Self {
        Self {
            engine,
            formatter,
            segments,
            config,
            suggestions: Vec::new(),
            active_symbol: None,
        }
    }

    /// Get the welcome message
    pub fn welcome(&self) -> &str {
        &self.config.welcome_message
    }

    /// Get the prompt
    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    /// The last suggestion list
    pub fn suggestions(&self) -> &[CatalogEntry] {
        &self.suggestions
    }

    /// The symbol whose profile was shown last
    pub fn active_symbol(&self) -> Option<&str> {
        self.active_symbol.as_deref()
    }

    /// Process user input and return a reply
    pub async fn process_input(&mut self, input: &str) -> Result<Reply> {
        let command = Command::parse(input)?;
        self.execute_command(command).await
    }

    /// Execute a parsed command
    pub async fn execute_command(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Search { query } => {
                self.suggestions = self.engine.suggest(&query).await;
                Ok(Reply::Text(self.formatter.format_suggestions(&self.suggestions)))
            }
            Command::Pick { index } => {
                let entry = index
                    .checked_sub(1)
                    .and_then(|i| self.suggestions.get(i))
                    .cloned()
                    .ok_or_else(|| {
                        LookupError::CommandError(format!(
                            "No suggestion #{index}; {} available",
                            self.suggestions.len()
                        ))
                    })?;
                Ok(Reply::Text(self.render_profile(&entry.symbol).await))
            }
            Command::Quote { symbol } => Ok(Reply::Text(self.render_profile(&symbol).await)),
            Command::Help => Ok(Reply::Text(self.formatter.format_help())),
            Command::Exit => Ok(Reply::Exit),
        }
    }

    /// Fetch and format the profile for `symbol`, making it the active symbol
    ///
    /// Provider failures are rendered as the generic fetch error message.
    pub async fn render_profile(&mut self, symbol: &str) -> String {
        let Some(provider) = self.engine.provider() else {
            return self.formatter.format_error("no data provider configured");
        };

        match provider.fetch_profile(symbol).await {
            Ok(profile) => {
                self.active_symbol = Some(profile.symbol.clone());
                let segments = self.segments.get(&profile.symbol);
                self.formatter.format_profile(&profile, segments)
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!("No profile for {}: {}", symbol, e);
                self.formatter.format_error(FETCH_ERROR_MESSAGE)
            }
            Err(e) => {
                tracing::warn!("Profile for {} failed: {}", symbol, e);
                self.formatter.format_error(FETCH_ERROR_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::interface::PlainFormatter;
    use crate::profile::CompanyProfile;
    use crate::provider::MockMarketDataProvider;

    fn session(mock: MockMarketDataProvider) -> LookupSession {
        let engine = SuggestionEngine::new(Arc::new(Catalog::builtin())).with_provider(Arc::new(mock));
        LookupSession::new(
            engine,
            Box::new(PlainFormatter),
            Arc::new(SegmentTable::builtin()),
            SessionConfig::default(),
        )
    }

    fn profile_mock() -> MockMarketDataProvider {
        let mut mock = MockMarketDataProvider::new();
        mock.expect_name().return_const("mock");
        mock.expect_fetch_profile().returning(|symbol| {
            match symbol {
                "ZZZZ" => return Err(LookupError::NotFound(symbol.to_string())),
                "DOWN" => return Err(LookupError::ApiError("service unavailable".to_string())),
                _ => {}
            }
            Ok(CompanyProfile {
                name: Some(format!("{symbol} Corp")),
                price: Some(10.0),
                market_cap: Some(5e9),
                ..CompanyProfile::new(symbol)
            })
        });
        mock
    }

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::builder().prompt("$ ").build();
        assert_eq!(config.prompt, "$ ");
        assert!(!config.welcome_message.is_empty());
    }

    #[tokio::test]
    async fn test_search_then_pick() {
        let mut session = session(profile_mock());

        let reply = session.process_input("micro").await.unwrap();
        assert_eq!(
            reply,
            Reply::Text(
                "1. MSFT - Microsoft Corporation\n2. AMD - Advanced Micro Devices Inc.".to_string()
            )
        );
        assert_eq!(session.suggestions().len(), 2);

        let Reply::Text(text) = session.process_input("/pick 1").await.unwrap() else {
            panic!("expected text");
        };
        assert!(text.starts_with("Company Name\nMSFT Corp"));
        assert!(text.contains("Intelligent Cloud"));
        assert_eq!(session.active_symbol(), Some("MSFT"));
    }

    #[tokio::test]
    async fn test_pick_out_of_range() {
        let mut session = session(profile_mock());
        assert!(matches!(
            session.process_input("/pick 1").await,
            Err(LookupError::CommandError(_))
        ));
    }

    #[tokio::test]
    async fn test_pick_zero_is_rejected() {
        let mut session = session(profile_mock());
        session.process_input("micro").await.unwrap();
        assert!(matches!(
            session.execute_command(Command::Pick { index: 0 }).await,
            Err(LookupError::CommandError(_))
        ));
        assert_eq!(session.active_symbol(), None);
    }

    #[tokio::test]
    async fn test_quote_failure_is_rendered() {
        let mut session = session(profile_mock());
        let reply = session.process_input("/quote zzzz").await.unwrap();
        assert_eq!(reply, Reply::Text(format!("Error: {FETCH_ERROR_MESSAGE}")));
        assert_eq!(session.active_symbol(), None);

        let reply = session.process_input("/quote down").await.unwrap();
        assert_eq!(reply, Reply::Text(format!("Error: {FETCH_ERROR_MESSAGE}")));
        assert_eq!(session.active_symbol(), None);
    }

    #[tokio::test]
    async fn test_unmatched_search_uses_fallback() {
        let mut mock = profile_mock();
        mock.expect_lookup_by_symbol()
            .times(1)
            .returning(|_| Ok(None));

        let mut session = session(mock);
        let reply = session.process_input("zzzz").await.unwrap();
        assert_eq!(reply, Reply::Text("No matching symbols.".to_string()));
        assert!(session.suggestions().is_empty());
    }

    #[tokio::test]
    async fn test_help_and_exit() {
        let mut session = session(profile_mock());
        let Reply::Text(help) = session.process_input("/help").await.unwrap() else {
            panic!("expected text");
        };
        assert!(help.contains("/pick"));
        assert_eq!(session.process_input("/exit").await.unwrap(), Reply::Exit);
    }
}
