//! rig-core integration for LLM-backed review text.
//!
//! Uses rig-core's provider clients and Agent abstraction for multi-provider
//! support. Currently supports: Anthropic, OpenAI, Cohere, Gemini, Perplexity,
//! DeepSeek, xAI, Groq, and any OpenAI-compatible API.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::config::ProviderConfig;
use crate::models::ProviderName;

use super::{ProviderError, ReviewProvider};

/// Build a single-turn agent from a rig-core client and prompt it.
///
/// Always sets `max_tokens`: without it some providers (e.g. Gemini)
/// default to a low limit that truncates long reviews.
macro_rules! prompt_text {
    ($client:expr, $config:expr, $system:expr, $user:expr, $label:expr) => {{
        let mut builder = $client
            .agent($config.model.as_str())
            .temperature($config.temperature)
            .max_tokens($config.max_tokens);
        if let Some(system) = $system {
            builder = builder.preamble(system);
        }
        let agent = builder.build();
        agent
            .prompt($user)
            .await
            .map_err(|e| ProviderError::ApiError(format!("{} API error: {e}", $label)))
    }};
}

/// Create a rig-core client using the `Client::new(api_key)` convention.
macro_rules! new_client {
    ($provider_mod:path, $api_key:expr, $label:expr) => {{
        <$provider_mod>::new($api_key).map_err(|e| {
            ProviderError::ApiError(format!("failed to create {} client: {e}", $label))
        })
    }};
}

/// rig-core based provider.
///
/// The provider name in config selects which rig-core client is used.
pub struct RigProvider {
    config: ProviderConfig,
}

impl RigProvider {
    /// Create a new RigProvider with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found for provider '{}'. Pass --api-key or set {} / {}.",
                config.name,
                crate::constants::ENV_API_KEY,
                config.name.api_key_env_var(),
            )));
        }
        if config.name == ProviderName::OpenAICompatible && config.base_url.is_none() {
            return Err(ProviderError::NotConfigured(
                "openai-compatible provider requires base_url to be set".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Get the API key or return an error.
    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
        label: &str,
    ) -> Result<providers::openai::CompletionsClient, ProviderError> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(ref base_url) = self.config.base_url {
            builder = builder.base_url(base_url);
        }
        builder
            .build()
            .map_err(|e| ProviderError::ApiError(format!("failed to create {label} client: {e}")))
    }

    /// Make a completion call through rig-core and return the response text.
    async fn call_rig(&self, system: Option<&str>, user: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let config = &self.config;

        match config.name {
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client = providers::anthropic::Client::builder()
                    .api_key(api_key)
                    .build()
                    .map_err(|e| {
                        ProviderError::ApiError(format!("failed to create Anthropic client: {e}"))
                    })?;
                prompt_text!(client, config, system, user, "Anthropic")
            }
            ProviderName::OpenAI => {
                let client = self.build_openai_client(api_key, "OpenAI")?;
                prompt_text!(client, config, system, user, "OpenAI")
            }
            ProviderName::OpenAICompatible => {
                let client = self.build_openai_client(api_key, "OpenAI-compatible")?;
                prompt_text!(client, config, system, user, "OpenAI-compatible")
            }
            ProviderName::Cohere => {
                let client = new_client!(providers::cohere::Client, api_key, "Cohere")?;
                prompt_text!(client, config, system, user, "Cohere")
            }
            ProviderName::Gemini => {
                let client = new_client!(providers::gemini::Client, api_key, "Gemini")?;
                prompt_text!(client, config, system, user, "Gemini")
            }
            ProviderName::Perplexity => {
                let client = new_client!(providers::perplexity::Client, api_key, "Perplexity")?;
                prompt_text!(client, config, system, user, "Perplexity")
            }
            ProviderName::DeepSeek => {
                let client = new_client!(providers::deepseek::Client, api_key, "DeepSeek")?;
                prompt_text!(client, config, system, user, "DeepSeek")
            }
            ProviderName::XAI => {
                let client = new_client!(providers::xai::Client, api_key, "xAI")?;
                prompt_text!(client, config, system, user, "xAI")
            }
            ProviderName::Groq => {
                let client = new_client!(providers::groq::Client, api_key, "Groq")?;
                prompt_text!(client, config, system, user, "Groq")
            }
        }
    }
}

#[async_trait]
impl ReviewProvider for RigProvider {
    async fn generate(
        &self,
        preamble: Option<&str>,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            provider = %self.config.name,
            model = %self.config.model,
            prompt_chars = prompt.chars().count(),
            "sending generation request"
        );
        let text = self.call_rig(preamble, prompt).await?;
        tracing::debug!(response_chars = text.chars().count(), "generation finished");
        Ok(text)
    }
}
