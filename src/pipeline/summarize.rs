//! Summary report: reviewed diff, per-author statistics and reviewers.

use std::path::PathBuf;

use crate::config::SummaryConfig;
use crate::diff::pull_request_diff;
use crate::github::GithubClient;
use crate::models::{DiffSource, PrimaryAuthor, RepoRef, SummaryReport};
use crate::providers::ReviewProvider;
use crate::stats::collect_author_stats;
use crate::summary::{ReviewOutcome, ReviewSummarizer};

use super::PipelineError;

/// Knobs for one `summarize` run.
#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub diff_source: DiffSource,
    /// Local clone used when `diff_source` is [`DiffSource::Git`].
    pub repo_path: PathBuf,
    pub chunk_size: usize,
    pub word_limit: usize,
    pub extra_prompt: Option<String>,
    pub primary_author: PrimaryAuthor,
}

impl SummaryOptions {
    pub fn from_config(config: &SummaryConfig, repo_path: PathBuf) -> Self {
        Self {
            diff_source: config.diff_source,
            repo_path,
            chunk_size: config.chunk_size,
            word_limit: config.word_limit,
            extra_prompt: config.extra_prompt.clone(),
            primary_author: config.primary_author,
        }
    }
}

/// Everything a `summarize` run produced.
#[derive(Debug, Clone)]
pub struct SummaryRun {
    pub report: SummaryReport,
    /// Head commit the review was computed for.
    pub head_sha: String,
    pub outcome: ReviewOutcome,
}

/// Build the summary report for one pull request.
///
/// Statistics are gathered before the diff is reviewed, so a PR with no
/// usable commits fails before any model call is made.
pub async fn build_summary_report(
    github: &GithubClient,
    provider: &dyn ReviewProvider,
    repo: &RepoRef,
    pr_number: u64,
    options: &SummaryOptions,
) -> Result<SummaryRun, PipelineError> {
    let pr = github.pull_request(repo, pr_number).await?;
    let reviewers = pr.requested_reviewer_logins();
    tracing::info!(
        head = %pr.head.sha,
        base = %pr.base.sha,
        reviewers = reviewers.len(),
        "fetched pull request"
    );

    let commits = github.pull_commits(repo, pr_number).await?;
    if commits.is_empty() {
        return Err(PipelineError::NoCommits(pr_number));
    }

    let ledger = collect_author_stats(github, repo, &commits).await?;
    let primary = ledger
        .primary(options.primary_author)
        .cloned()
        .ok_or(PipelineError::NoAuthorStats {
            pr: pr_number,
            skipped: ledger.skipped(),
        })?;
    tracing::info!(
        author = %primary.github_id,
        mode = %options.primary_author,
        "selected primary author"
    );

    let diff = pull_request_diff(
        options.diff_source,
        github,
        repo,
        &pr,
        &options.repo_path,
    )
    .await?;

    let outcome = ReviewSummarizer::new(provider, options.chunk_size)
        .with_word_limit(options.word_limit)
        .with_extra_prompt(options.extra_prompt.clone())
        .review(&diff)
        .await?;

    let report = SummaryReport {
        repository: repo.to_string(),
        pr_number,
        github_id: primary.github_id,
        commit_count: primary.commit_count,
        additions: primary.additions,
        deletions: primary.deletions,
        total: primary.total,
        reviewers,
        review_summary: outcome.formatted(),
        contributors: ledger.into_authors(),
    };

    Ok(SummaryRun {
        report,
        head_sha: pr.head.sha,
        outcome,
    })
}
