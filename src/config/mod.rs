//! Configuration loading and layering.
//!
//! Handles `.prscribe.toml` loading, environment variable resolution,
//! and validation of the merged result.

pub mod loader;

pub use loader::{
    Config, ConfigError, GithubConfig, LoggingConfig, ProviderConfig, ReportConfig, SummaryConfig,
};
