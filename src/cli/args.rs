//! Clap argument types.

use clap::{Args, Parser};
use std::path::PathBuf;

use prscribe::constants;
use prscribe::models::{DiffSource, PrimaryAuthor, ProviderName, RepoRef};

/// Pull request reports for CI: contributor stats and AI review summaries.
#[derive(Parser, Debug)]
#[command(name = "prscribe", version = constants::VERSION)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `prscribe=trace` (overrides RUST_LOG).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Post commit and review-comment counts per contributor.
    Contributors(ContributorsArgs),

    /// Review the PR diff with an LLM and post the summary with author stats.
    Summarize(Box<SummarizeArgs>),

    /// Print version and build information.
    Version,
}

/// Pull request selection and reporting options shared by both pipelines.
#[derive(Args, Debug, Clone)]
pub struct PullRequestArgs {
    /// GitHub token (default: GITHUB_TOKEN or GH_TOKEN).
    #[arg(long)]
    pub token: Option<String>,

    /// Repository as owner/name.
    #[arg(long, env = constants::ENV_GITHUB_REPOSITORY)]
    pub repo: RepoRef,

    /// Pull request number.
    #[arg(long = "pr", env = constants::ENV_PR_NUMBER)]
    pub pr_number: u64,

    /// Base URL of the reporting service (default: PRSCRIBE_ENDPOINT).
    #[arg(long)]
    pub endpoint: Option<String>,

    /// GitHub REST API base URL, for GitHub Enterprise.
    #[arg(long)]
    pub github_api_url: Option<String>,

    /// Print the payload without posting it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Arguments for the `contributors` subcommand.
#[derive(Parser, Debug)]
pub struct ContributorsArgs {
    #[command(flatten)]
    pub pr: PullRequestArgs,
}

/// Arguments for the `summarize` subcommand.
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub pr: PullRequestArgs,

    // --- Provider ---
    /// LLM provider (default: gemini).
    #[arg(long)]
    pub provider: Option<ProviderName>,

    /// Model name (default depends on the provider).
    #[arg(long)]
    pub model: Option<String>,

    /// API key for the provider (default: PRSCRIBE_API_KEY or the provider's own variable).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL for OpenAI-compatible providers.
    #[arg(long)]
    pub base_url: Option<String>,

    // --- Review ---
    /// Maximum characters per diff chunk.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Additional instruction appended to the reviewer prompt.
    #[arg(long)]
    pub extra_prompt: Option<String>,

    /// Where to read the diff from: a local clone (git) or the GitHub API.
    #[arg(long)]
    pub diff_source: Option<DiffSource>,

    /// Path to the local clone used by `--diff-source git`.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Which author fills the report's top-level stats: first or top.
    #[arg(long)]
    pub primary_author: Option<PrimaryAuthor>,

    /// Also post the formatted review as a comment review on the PR.
    #[arg(long, default_value_t = false)]
    pub post_review: bool,
}
