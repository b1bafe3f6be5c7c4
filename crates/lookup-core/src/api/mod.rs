//! API clients for market data providers

pub mod finnhub;
pub mod yahoo;

pub use finnhub::{FinnhubClient, FinnhubClientBuilder, FinnhubProfile, FinnhubQuote};
pub use yahoo::{Quote, SearchHit, YahooFinanceClient};
