//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary after loading)
//! 2. Environment variables
//! 3. `.prscribe.toml` in the working directory
//! 4. `~/.config/prscribe/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;
use crate::models::{DiffSource, PrimaryAuthor, ProviderName};

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub provider: ProviderConfig,
    pub summary: SummaryConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// GitHub API access.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: constants::GITHUB_API_URL.to_string(),
            token: None,
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    /// Empty means "the provider's default model", resolved by [`Config::finalize`].
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub max_tokens: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Gemini,
            model: String::new(),
            base_url: None,
            api_key: None,
            temperature: 1.0,
            max_tokens: 8192,
        }
    }
}

/// Chunked review summarizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub chunk_size: usize,
    pub word_limit: usize,
    pub extra_prompt: Option<String>,
    pub diff_source: DiffSource,
    pub primary_author: PrimaryAuthor,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            chunk_size: constants::DEFAULT_CHUNK_SIZE,
            word_limit: constants::DEFAULT_SUMMARY_WORDS,
            extra_prompt: None,
            diff_source: DiffSource::Git,
            primary_author: PrimaryAuthor::First,
        }
    }
}

/// Reporting endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, e.g. `info` or `prscribe=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, the local config in `work_dir`, then
    /// applies environment variable overrides. Call [`Config::finalize`]
    /// once CLI flags have been applied.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = work_dir {
            let local_path = dir.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        // GitHub settings
        let default_github = GithubConfig::default();
        if other.github.api_url != default_github.api_url {
            self.github.api_url = other.github.api_url;
        }
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.timeout_secs != default_github.timeout_secs {
            self.github.timeout_secs = other.github.timeout_secs;
        }

        // Provider settings
        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if !other.provider.model.is_empty() {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
        if other.provider.temperature != default_provider.temperature {
            self.provider.temperature = other.provider.temperature;
        }
        if other.provider.max_tokens != default_provider.max_tokens {
            self.provider.max_tokens = other.provider.max_tokens;
        }

        // Summary settings
        let default_summary = SummaryConfig::default();
        if other.summary.chunk_size != default_summary.chunk_size {
            self.summary.chunk_size = other.summary.chunk_size;
        }
        if other.summary.word_limit != default_summary.word_limit {
            self.summary.word_limit = other.summary.word_limit;
        }
        if other.summary.extra_prompt.is_some() {
            self.summary.extra_prompt = other.summary.extra_prompt;
        }
        if other.summary.diff_source != default_summary.diff_source {
            self.summary.diff_source = other.summary.diff_source;
        }
        if other.summary.primary_author != default_summary.primary_author {
            self.summary.primary_author = other.summary.primary_author;
        }

        // Report settings
        if other.report.endpoint.is_some() {
            self.report.endpoint = other.report.endpoint;
        }
        if other.report.timeout_secs != ReportConfig::default().timeout_secs {
            self.report.timeout_secs = other.report.timeout_secs;
        }

        // Logging settings
        if other.logging.level != LoggingConfig::default().level {
            self.logging.level = other.logging.level;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(token) = env.first_of(&[constants::ENV_GITHUB_TOKEN, "GH_TOKEN"]) {
            self.github.token = Some(token);
        }
        if let Some(url) = env.var(constants::ENV_GITHUB_API_URL) {
            self.github.api_url = url;
        }
        if let Some(endpoint) = env.var(constants::ENV_ENDPOINT) {
            self.report.endpoint = Some(endpoint);
        }

        if let Some(val) = env.var(constants::ENV_PROVIDER) {
            match val.parse::<ProviderName>() {
                Ok(name) => self.provider.name = name,
                Err(_) => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_PROVIDER
                ),
            }
        }
        if let Some(val) = env.var(constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Some(val) = env.var(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        // Provider-specific API key resolution
        if let Some(key) =
            env.first_of(&[constants::ENV_API_KEY, self.provider.name.api_key_env_var()])
        {
            self.provider.api_key = Some(key);
        }

        if let Some(val) = env.var(constants::ENV_CHUNK_SIZE) {
            match val.parse::<usize>() {
                Ok(size) => self.summary.chunk_size = size,
                Err(_) => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    constants::ENV_CHUNK_SIZE
                ),
            }
        }

        if let Some(level) = env.var(constants::ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }

    /// Resolve derived defaults and validate the final configuration.
    pub fn finalize(&mut self) -> Result<(), ConfigError> {
        if self.provider.model.trim().is_empty() {
            self.provider.model = self.provider.name.default_model().to_string();
        }
        if self.summary.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "summary.chunk_size must be at least 1".to_string(),
            ));
        }
        if self.summary.word_limit == 0 {
            return Err(ConfigError::Invalid(
                "summary.word_limit must be at least 1".to_string(),
            ));
        }
        if self.github.timeout_secs == 0 || self.report.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let mut config = Config::default();
        config.finalize().unwrap();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.provider.name, ProviderName::Gemini);
        assert_eq!(config.provider.model, "gemini-1.5-flash");
        assert_eq!(config.summary.chunk_size, 3500);
        assert_eq!(config.summary.word_limit, 256);
        assert_eq!(config.summary.diff_source, DiffSource::Git);
        assert_eq!(config.logging.level, "info");
        assert!(config.report.endpoint.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[github]
api_url = "https://ghe.example.com/api/v3"

[provider]
name = "openai"
model = "gpt-4o"
temperature = 0.2

[summary]
chunk_size = 2000
diff_source = "api"
primary_author = "top"

[report]
endpoint = "https://reports.example.com"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.provider.temperature, 0.2);
        assert_eq!(config.summary.chunk_size, 2000);
        assert_eq!(config.summary.diff_source, DiffSource::Api);
        assert_eq!(config.summary.primary_author, PrimaryAuthor::Top);
        assert_eq!(
            config.report.endpoint.as_deref(),
            Some("https://reports.example.com")
        );
    }

    #[test]
    fn merge_overrides_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.provider.name = ProviderName::Anthropic;
        other.provider.model = "claude".to_string();
        other.summary.chunk_size = 100;
        other.summary.extra_prompt = Some("Focus on SQL.".to_string());
        other.report.endpoint = Some("https://r.example".to_string());
        other.logging.level = "debug".to_string();

        base.merge(other);

        assert_eq!(base.provider.name, ProviderName::Anthropic);
        assert_eq!(base.provider.model, "claude");
        assert_eq!(base.summary.chunk_size, 100);
        assert_eq!(base.summary.extra_prompt.as_deref(), Some("Focus on SQL."));
        assert_eq!(base.report.endpoint.as_deref(), Some("https://r.example"));
        assert_eq!(base.logging.level, "debug");
    }

    #[test]
    fn merge_keeps_base_when_other_is_default() {
        let mut base = Config::default();
        base.provider.model = "gemini-2.0-flash".to_string();
        base.summary.chunk_size = 1000;
        base.report.endpoint = Some("https://keep.example".to_string());

        base.merge(Config::default());

        assert_eq!(base.provider.model, "gemini-2.0-flash");
        assert_eq!(base.summary.chunk_size, 1000);
        assert_eq!(base.report.endpoint.as_deref(), Some("https://keep.example"));
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_file_not_found() {
        let result = Config::load_file(Path::new("/tmp/prscribe_not_exist_config.toml"));
        assert!(result.unwrap_err().to_string().contains("read"));
    }

    #[test]
    #[serial_test::serial]
    fn load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".prscribe.toml"),
            "[summary]\nchunk_size = 1234\n\n[report]\nendpoint = \"https://local.example\"\n",
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.summary.chunk_size, 1234);
        assert_eq!(config.report.endpoint.as_deref(), Some("https://local.example"));
    }

    #[test]
    #[serial_test::serial]
    fn env_vars_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".prscribe.toml"),
            "[report]\nendpoint = \"https://file.example\"\n",
        )
        .unwrap();
        let env = Env::mock([
            ("PRSCRIBE_ENDPOINT", "https://env.example"),
            ("GITHUB_TOKEN", "ghp_env"),
            ("PRSCRIBE_CHUNK_SIZE", "42"),
        ]);

        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.report.endpoint.as_deref(), Some("https://env.example"));
        assert_eq!(config.github.token.as_deref(), Some("ghp_env"));
        assert_eq!(config.summary.chunk_size, 42);
    }

    #[test]
    #[serial_test::serial]
    fn local_config_overrides_global_config() {
        struct XdgGuard(Option<std::ffi::OsString>);
        impl Drop for XdgGuard {
            fn drop(&mut self) {
                unsafe {
                    match self.0.take() {
                        Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
                        None => std::env::remove_var("XDG_CONFIG_HOME"),
                    }
                }
            }
        }
        let _guard = XdgGuard(std::env::var_os("XDG_CONFIG_HOME"));

        let global = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(global.path().join("prscribe")).unwrap();
        std::fs::write(
            global.path().join("prscribe").join("config.toml"),
            "[provider]\nmodel = \"gemini-2.0-flash\"\n\n[summary]\nchunk_size = 900\n",
        )
        .unwrap();
        let local = tempfile::tempdir().unwrap();
        std::fs::write(
            local.path().join(".prscribe.toml"),
            "[summary]\nchunk_size = 1800\n",
        )
        .unwrap();

        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", global.path());
        }
        let config = Config::load(Some(local.path()), &no_env()).unwrap();
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert_eq!(config.summary.chunk_size, 1800);
    }

    #[test]
    fn gh_token_is_a_fallback() {
        let env = Env::mock([("GH_TOKEN", "ghp_cli")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.github.token.as_deref(), Some("ghp_cli"));
    }

    #[test]
    fn provider_specific_api_key_fallback() {
        let env = Env::mock([("GEMINI_API_KEY", "gem-key")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key.as_deref(), Some("gem-key"));
    }

    #[test]
    fn generic_api_key_wins_over_provider_specific() {
        let env = Env::mock([("GEMINI_API_KEY", "gem-key"), ("PRSCRIBE_API_KEY", "generic")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key.as_deref(), Some("generic"));
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let env = Env::mock([("PRSCRIBE_PROVIDER", "nope"), ("PRSCRIBE_CHUNK_SIZE", "lots")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.name, ProviderName::Gemini);
        assert_eq!(config.summary.chunk_size, 3500);
    }

    #[test]
    fn finalize_uses_provider_default_model() {
        let mut config = Config::default();
        config.provider.name = ProviderName::Anthropic;
        config.finalize().unwrap();
        assert_eq!(config.provider.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn finalize_rejects_zero_chunk_size() {
        let mut config = Config::default();
        config.summary.chunk_size = 0;
        let err = config.finalize().unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut config = Config::default();
        config.github.token = Some("ghp_secret".to_string());
        config.provider.api_key = Some("sk-secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
