//! ReviewProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core to decouple the
//! summarizer from the specific LLM library.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the review provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for text generation backends.
///
/// Each call is an independent, single-turn exchange: an optional system
/// preamble plus one user message, answered with plain text.
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    async fn generate(&self, preamble: Option<&str>, prompt: &str)
    -> Result<String, ProviderError>;
}
