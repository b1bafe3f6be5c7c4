//! Shared utilities for stock-lookup
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and process-level settings read from the environment.

pub mod config;
pub mod logging;

pub use config::{LogFormat, Settings, SettingsError};
pub use logging::{build_filter, init_tracing};
