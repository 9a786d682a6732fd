//! Shared types used across all modules.
//!
//! This module defines the GitHub wire records, the per-invocation domain
//! records built from them, and the report payloads posted downstream.
//! Other modules import from here rather than reaching into each other's
//! internals.

pub mod contributor;
pub mod github;
pub mod report;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use contributor::{AuthorStats, CommitRecord, ContributorSummary, ReviewFeedback};
pub use report::{ContributorReport, SummaryReport};

/// Error returned when a repository identifier is not `owner/name`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid repository '{0}': expected the form owner/name")]
pub struct ParseRepoError(pub String);

/// A GitHub repository identifier (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = ParseRepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| ParseRepoError(s.to_string()))?;
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid(owner) || !valid(name) {
            return Err(ParseRepoError(s.to_string()));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Supported LLM provider backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    Cohere,
    #[default]
    Gemini,
    Perplexity,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "xai")]
    XAI,
    Groq,
    /// Any OpenAI-compatible API (e.g. Ollama, Together, local servers).
    #[serde(rename = "openai-compatible")]
    OpenAICompatible,
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderName::Anthropic => write!(f, "anthropic"),
            ProviderName::OpenAI => write!(f, "openai"),
            ProviderName::Cohere => write!(f, "cohere"),
            ProviderName::Gemini => write!(f, "gemini"),
            ProviderName::Perplexity => write!(f, "perplexity"),
            ProviderName::DeepSeek => write!(f, "deepseek"),
            ProviderName::XAI => write!(f, "xai"),
            ProviderName::Groq => write!(f, "groq"),
            ProviderName::OpenAICompatible => write!(f, "openai-compatible"),
        }
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(ProviderName::Anthropic),
            "openai" => Ok(ProviderName::OpenAI),
            "cohere" => Ok(ProviderName::Cohere),
            "gemini" => Ok(ProviderName::Gemini),
            "perplexity" => Ok(ProviderName::Perplexity),
            "deepseek" => Ok(ProviderName::DeepSeek),
            "xai" => Ok(ProviderName::XAI),
            "groq" => Ok(ProviderName::Groq),
            "openai-compatible" => Ok(ProviderName::OpenAICompatible),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: anthropic, openai, cohere, \
                 gemini, perplexity, deepseek, xai, groq, openai-compatible"
            )),
        }
    }
}

impl ProviderName {
    /// Returns the provider-specific environment variable name for the API key.
    ///
    /// These match the env var names used by rig-core's `from_env()` implementations.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
            ProviderName::Cohere => "COHERE_API_KEY",
            ProviderName::Gemini => "GEMINI_API_KEY",
            ProviderName::Perplexity => "PERPLEXITY_API_KEY",
            ProviderName::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderName::XAI => "XAI_API_KEY",
            ProviderName::Groq => "GROQ_API_KEY",
        }
    }

    /// Model used when neither config nor CLI names one.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderName::Anthropic => "claude-sonnet-4-20250514",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "gpt-4o-mini",
            ProviderName::Cohere => "command-r",
            ProviderName::Gemini => "gemini-1.5-flash",
            ProviderName::Perplexity => "sonar",
            ProviderName::DeepSeek => "deepseek-chat",
            ProviderName::XAI => "grok-2",
            ProviderName::Groq => "llama-3.3-70b-versatile",
        }
    }
}

/// Where the summary pipeline reads the PR diff from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffSource {
    /// Diff base..head in a local clone via libgit2.
    #[default]
    Git,
    /// Ask the GitHub API for the PR diff.
    Api,
}

impl fmt::Display for DiffSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffSource::Git => write!(f, "git"),
            DiffSource::Api => write!(f, "api"),
        }
    }
}

impl std::str::FromStr for DiffSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "git" => Ok(DiffSource::Git),
            "api" => Ok(DiffSource::Api),
            other => Err(format!("unsupported diff source: '{other}'. Supported: git, api")),
        }
    }
}

/// Which author's statistics fill the top-level fields of the summary report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryAuthor {
    /// First author in commit-list order.
    #[default]
    First,
    /// Author with the most commits (ties go to the earlier author).
    Top,
}

impl fmt::Display for PrimaryAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryAuthor::First => write!(f, "first"),
            PrimaryAuthor::Top => write!(f, "top"),
        }
    }
}

impl std::str::FromStr for PrimaryAuthor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(PrimaryAuthor::First),
            "top" => Ok(PrimaryAuthor::Top),
            other => Err(format!("unsupported primary author mode: '{other}'. Supported: first, top")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_ref_parses_owner_and_name() {
        let repo: RepoRef = "octo-org/hello.world".parse().unwrap();
        assert_eq!(repo.owner, "octo-org");
        assert_eq!(repo.name, "hello.world");
        assert_eq!(repo.to_string(), "octo-org/hello.world");
    }

    #[test]
    fn repo_ref_rejects_malformed_input() {
        for bad in ["", "noslash", "/name", "owner/", "a/b/c", "own er/name", "o/n;rm -rf"] {
            let result = bad.parse::<RepoRef>();
            assert!(result.is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn repo_ref_error_mentions_input() {
        let err = "nope".parse::<RepoRef>().unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains("owner/name"));
    }

    #[test]
    fn provider_name_default_is_gemini() {
        assert_eq!(ProviderName::default(), ProviderName::Gemini);
        assert_eq!(ProviderName::default().default_model(), "gemini-1.5-flash");
    }

    #[test]
    fn provider_name_from_str_case_insensitive() {
        assert_eq!("Gemini".parse::<ProviderName>().unwrap(), ProviderName::Gemini);
        assert_eq!("OPENAI".parse::<ProviderName>().unwrap(), ProviderName::OpenAI);
        assert_eq!(
            "openai-compatible".parse::<ProviderName>().unwrap(),
            ProviderName::OpenAICompatible
        );
    }

    #[test]
    fn provider_name_from_str_invalid() {
        let err = "invalid".parse::<ProviderName>().unwrap_err();
        assert!(err.contains("unsupported provider"));
    }

    #[test]
    fn provider_name_api_key_env_var() {
        assert_eq!(ProviderName::Gemini.api_key_env_var(), "GEMINI_API_KEY");
        assert_eq!(ProviderName::Anthropic.api_key_env_var(), "ANTHROPIC_API_KEY");
        assert_eq!(ProviderName::OpenAICompatible.api_key_env_var(), "OPENAI_API_KEY");
    }

    #[test]
    fn provider_name_display_matches_serde() {
        for name in [ProviderName::Gemini, ProviderName::DeepSeek, ProviderName::OpenAICompatible] {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn diff_source_and_primary_author_parse() {
        assert_eq!("git".parse::<DiffSource>().unwrap(), DiffSource::Git);
        assert_eq!("API".parse::<DiffSource>().unwrap(), DiffSource::Api);
        assert!("svn".parse::<DiffSource>().is_err());
        assert_eq!("top".parse::<PrimaryAuthor>().unwrap(), PrimaryAuthor::Top);
        assert_eq!(PrimaryAuthor::default(), PrimaryAuthor::First);
        assert!("last".parse::<PrimaryAuthor>().is_err());
    }
}
