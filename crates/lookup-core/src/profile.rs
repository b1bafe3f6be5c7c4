//! Company profile data and number formatting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quote and profile data for one symbol, as returned by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    /// Market capitalization in whole currency units
    pub market_cap: Option<f64>,
    pub exchange: Option<String>,
    pub industry: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl CompanyProfile {
    /// Create an empty profile for `symbol`
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            price: None,
            currency: None,
            market_cap: None,
            exchange: None,
            industry: None,
            fetched_at: Utc::now(),
        }
    }

    /// Display name, or `N/A` when the provider did not report one
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    /// Price formatted as dollars; a missing price renders as `$0.00`
    pub fn display_price(&self) -> String {
        format_price(self.price.unwrap_or(0.0))
    }

    /// Market cap in compact form; a missing market cap renders as `$0.00`
    pub fn display_market_cap(&self) -> String {
        format_large_number(self.market_cap.unwrap_or(0.0))
    }
}

/// Format a dollar price with two decimals
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Format a dollar amount with T/B/M suffixes
///
/// Values below one million are printed in full with thousands separators.
pub fn format_large_number(num: f64) -> String {
    if num >= 1e12 {
        format!("${:.2}T", num / 1e12)
    } else if num >= 1e9 {
        format!("${:.2}B", num / 1e9)
    } else if num >= 1e6 {
        format!("${:.2}M", num / 1e6)
    } else {
        format!("${}", with_thousands_separators(num))
    }
}

fn with_thousands_separators(num: f64) -> String {
    let formatted = format!("{:.2}", num.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if num < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_large_number_suffixes() {
        assert_eq!(format_large_number(1.5e12), "$1.50T");
        assert_eq!(format_large_number(2.5e9), "$2.50B");
        assert_eq!(format_large_number(3.2e6), "$3.20M");
        assert_eq!(format_large_number(1e6), "$1.00M");
    }

    #[test]
    fn test_format_large_number_small_values() {
        assert_eq!(format_large_number(1234.5), "$1,234.50");
        assert_eq!(format_large_number(999_999.999), "$1,000,000.00");
        assert_eq!(format_large_number(12.0), "$12.00");
        assert_eq!(format_large_number(0.0), "$0.00");
        assert_eq!(format_large_number(-4321.0), "$-4,321.00");
    }

    #[test]
    fn test_profile_display_defaults() {
        let profile = CompanyProfile::new("ZZZZ");
        assert_eq!(profile.display_name(), "N/A");
        assert_eq!(profile.display_price(), "$0.00");
        assert_eq!(profile.display_market_cap(), "$0.00");
    }

    #[test]
    fn test_profile_display_values() {
        let profile = CompanyProfile {
            name: Some("Apple Inc.".to_string()),
            price: Some(189.456),
            market_cap: Some(2.95e12),
            ..CompanyProfile::new("AAPL")
        };
        assert_eq!(profile.display_name(), "Apple Inc.");
        assert_eq!(profile.display_price(), "$189.46");
        assert_eq!(profile.display_market_cap(), "$2.95T");
    }
}
