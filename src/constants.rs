//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! API hosts and defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "prscribe";

/// Package version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple this binary was built for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// User-Agent sent with every HTTP request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("prscribe/", env!("CARGO_PKG_VERSION"));

/// Local config filename (e.g. `.prscribe.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".prscribe.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "prscribe";

// ── GitHub ──────────────────────────────────────────────────────────

/// Default GitHub REST API host.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Pinned GitHub REST API version header value.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Page size for paginated list endpoints (GitHub's maximum).
pub const GITHUB_PAGE_SIZE: usize = 100;

// ── Report endpoint paths ───────────────────────────────────────────

/// Path the contributor report is posted to, relative to the endpoint.
pub const CONTRIBUTORS_REPORT_PATH: &str = "api/v1/pr";

/// Path the review summary report is posted to, relative to the endpoint.
pub const SUMMARY_REPORT_PATH: &str = "pr";

// ── Summarizer defaults ─────────────────────────────────────────────

/// Maximum characters per diff chunk sent to the model.
pub const DEFAULT_CHUNK_SIZE: usize = 3500;

/// Target word count for the condensed summary.
pub const DEFAULT_SUMMARY_WORDS: usize = 256;

/// Default request timeout for GitHub and report calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_GITHUB_API_URL: &str = "PRSCRIBE_GITHUB_API_URL";
pub const ENV_PR_NUMBER: &str = "PRSCRIBE_PR_NUMBER";
pub const ENV_ENDPOINT: &str = "PRSCRIBE_ENDPOINT";
pub const ENV_PROVIDER: &str = "PRSCRIBE_PROVIDER";
pub const ENV_MODEL: &str = "PRSCRIBE_MODEL";
pub const ENV_API_KEY: &str = "PRSCRIBE_API_KEY";
pub const ENV_BASE_URL: &str = "PRSCRIBE_BASE_URL";
pub const ENV_CHUNK_SIZE: &str = "PRSCRIBE_CHUNK_SIZE";
pub const ENV_LOG_LEVEL: &str = "PRSCRIBE_LOG_LEVEL";
