//! Error types for lookup operations

use thiserror::Error;

/// Errors raised by catalog loading, provider calls and command handling
#[derive(Debug, Error)]
pub enum LookupError {
    /// API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// The provider does not know the symbol
    #[error("Symbol not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded {
        provider: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File access error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Finnhub API error
    #[error("Finnhub error: {0}")]
    FinnhubError(String),

    /// Catalog or segment table failed validation
    #[error("Catalog error: {0}")]
    CatalogError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Command parsing error
    #[error("Command error: {0}")]
    CommandError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LookupError {
    /// Whether the error means the symbol does not exist, as opposed to a
    /// transport or provider failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

/// Convert anyhow::Error to LookupError
impl From<anyhow::Error> for LookupError {
    fn from(err: anyhow::Error) -> Self {
        LookupError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LookupError::NotFound("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Symbol not found: ZZZZ");

        let err = LookupError::RateLimitExceeded {
            provider: "finnhub".to_string(),
        };
        assert_eq!(err.to_string(), "Rate limit exceeded for finnhub");

        let err = LookupError::CatalogError("duplicate symbol MSFT".to_string());
        assert_eq!(err.to_string(), "Catalog error: duplicate symbol MSFT");
    }

    #[test]
    fn test_error_conversion() {
        let err: LookupError = anyhow::anyhow!("boom").into();
        match err {
            LookupError::Other(msg) => assert_eq!(msg, "boom"),
            _ => panic!("Expected Other variant"),
        }

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LookupError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(LookupError::NotFound("ZZZZ".to_string()).is_not_found());
        assert!(!LookupError::ApiError("down".to_string()).is_not_found());
    }
}
