//! prscribe — pull request reports for CI (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod diff;
pub mod env;
pub mod github;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod report;
pub mod stats;
pub mod summary;
