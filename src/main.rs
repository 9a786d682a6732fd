//! prscribe — pull request reports for CI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use prscribe::config;
use prscribe::constants;
use prscribe::env;
use prscribe::github;
use prscribe::logging;
use prscribe::pipeline;
use prscribe::providers;
use prscribe::report;

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cli::args::{Cli, Command, ContributorsArgs, PullRequestArgs, SummarizeArgs};
use config::Config;
use env::Env;
use github::GithubClient;
use pipeline::SummaryOptions;
use providers::rig::RigProvider;
use report::ReportPublisher;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_level = cli.log_level;

    match cli.command {
        Command::Contributors(args) => run_contributors(args, log_level.as_deref()).await,
        Command::Summarize(args) => run_summarize(*args, log_level.as_deref()).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Load layered config, apply the shared PR flags, and start logging.
fn load_config(args: &PullRequestArgs, log_level: Option<&str>, env: &Env) -> Result<Config> {
    let work_dir = std::env::current_dir().context("failed to determine working directory")?;
    let mut config =
        Config::load(Some(&work_dir), env).context("failed to load configuration")?;

    if let Some(ref token) = args.token {
        config.github.token = Some(token.clone());
    }
    if let Some(ref url) = args.github_api_url {
        config.github.api_url = url.clone();
    }
    if let Some(ref endpoint) = args.endpoint {
        config.report.endpoint = Some(endpoint.clone());
    }

    let directive = logging::resolve_filter(
        log_level,
        env.var("RUST_LOG").as_deref(),
        &config.logging.level,
    );
    logging::init(&directive);

    Ok(config)
}

fn github_client(config: &Config) -> Result<GithubClient> {
    let token = config.github.token.as_deref().with_context(|| {
        format!(
            "no GitHub token found. Pass --token or set {}.",
            constants::ENV_GITHUB_TOKEN
        )
    })?;
    GithubClient::new(
        &config.github.api_url,
        token,
        Duration::from_secs(config.github.timeout_secs),
    )
    .context("failed to create GitHub client")
}

/// Resolve the publisher up front so a missing endpoint fails before any API call.
fn report_publisher(config: &Config, dry_run: bool) -> Result<Option<ReportPublisher>> {
    if dry_run {
        return Ok(None);
    }
    let endpoint = config.report.endpoint.as_deref().with_context(|| {
        format!(
            "no report endpoint configured. Pass --endpoint, set {}, or use --dry-run.",
            constants::ENV_ENDPOINT
        )
    })?;
    let publisher = ReportPublisher::new(endpoint, Duration::from_secs(config.report.timeout_secs))
        .context("failed to create report client")?;
    Ok(Some(publisher))
}

/// Print the payload to stdout and, unless dry-running, post it.
async fn emit<T: Serialize>(
    payload: &T,
    publisher: Option<&ReportPublisher>,
    path: &str,
) -> Result<()> {
    let pretty = serde_json::to_string_pretty(payload).context("failed to serialize report")?;
    println!("{pretty}");

    match publisher {
        Some(publisher) => {
            publisher
                .publish(path, payload)
                .await
                .with_context(|| format!("failed to publish report to {}", publisher.url_for(path)))?;
        }
        None => tracing::info!("dry run: report not posted"),
    }
    Ok(())
}

/// Run the contributor pipeline.
async fn run_contributors(args: ContributorsArgs, log_level: Option<&str>) -> Result<()> {
    let env = Env::real();
    let mut config = load_config(&args.pr, log_level, &env)?;
    config.finalize().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let github = github_client(&config)?;
    let publisher = report_publisher(&config, args.pr.dry_run)?;

    tracing::info!(repo = %args.pr.repo, pr = args.pr.pr_number, "building contributor report");
    let report = pipeline::build_contributor_report(&github, &args.pr.repo, args.pr.pr_number)
        .await
        .with_context(|| format!("failed to build contributor report for PR #{}", args.pr.pr_number))?;

    emit(&report, publisher.as_ref(), constants::CONTRIBUTORS_REPORT_PATH).await
}

/// Run the summary pipeline.
async fn run_summarize(args: SummarizeArgs, log_level: Option<&str>) -> Result<()> {
    let env = Env::real();
    let mut config = load_config(&args.pr, log_level, &env)?;

    // CLI flags take precedence over file and environment values
    if let Some(provider) = args.provider {
        if provider != config.provider.name && args.api_key.is_none() {
            // Re-resolve the key for the selected provider
            config.provider.api_key = env.first_of(&[
                constants::ENV_API_KEY,
                provider.api_key_env_var(),
            ]);
        }
        config.provider.name = provider;
    }
    if let Some(ref model) = args.model {
        config.provider.model = model.clone();
    }
    if let Some(ref key) = args.api_key {
        config.provider.api_key = Some(key.clone());
    }
    if let Some(ref url) = args.base_url {
        config.provider.base_url = Some(url.clone());
    }
    if let Some(size) = args.chunk_size {
        config.summary.chunk_size = size;
    }
    if let Some(ref extra) = args.extra_prompt {
        config.summary.extra_prompt = Some(extra.clone());
    }
    if let Some(source) = args.diff_source {
        config.summary.diff_source = source;
    }
    if let Some(mode) = args.primary_author {
        config.summary.primary_author = mode;
    }
    config.finalize().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let github = github_client(&config)?;
    let publisher = report_publisher(&config, args.pr.dry_run)?;
    let provider = RigProvider::new(config.provider.clone())
        .context("failed to initialize LLM provider")?;

    let options = SummaryOptions::from_config(&config.summary, args.path.clone());
    tracing::info!(
        repo = %args.pr.repo,
        pr = args.pr.pr_number,
        provider = %config.provider.name,
        model = %config.provider.model,
        "building summary report"
    );
    let run = pipeline::build_summary_report(
        &github,
        &provider,
        &args.pr.repo,
        args.pr.pr_number,
        &options,
    )
    .await
    .with_context(|| format!("failed to build summary report for PR #{}", args.pr.pr_number))?;

    emit(&run.report, publisher.as_ref(), constants::SUMMARY_REPORT_PATH).await?;

    if args.post_review {
        if args.pr.dry_run {
            tracing::info!("dry run: review comment not posted");
        } else {
            github
                .create_review(
                    &args.pr.repo,
                    args.pr.pr_number,
                    &run.head_sha,
                    &run.report.review_summary,
                )
                .await
                .context("failed to post review comment")?;
            tracing::info!(pr = args.pr.pr_number, "posted review comment");
        }
    }

    Ok(())
}
