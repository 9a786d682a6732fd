//! Contributor report: commits and review comments grouped per author.

use crate::aggregate::ContributionLedger;
use crate::github::GithubClient;
use crate::models::{ContributorReport, RepoRef};

use super::PipelineError;

/// Fetch a pull request's commits and review comments and aggregate them.
pub async fn build_contributor_report(
    github: &GithubClient,
    repo: &RepoRef,
    pr_number: u64,
) -> Result<ContributorReport, PipelineError> {
    let commits = github.pull_commits(repo, pr_number).await?;
    tracing::info!(commits = commits.len(), "fetched pull request commits");

    let mut ledger = ContributionLedger::new();
    ledger.record_commits(&commits)?;

    let comments = github.review_comments(repo, pr_number).await?;
    tracing::info!(comments = comments.len(), "fetched review comments");
    ledger.record_review_comments(&comments);

    tracing::info!(
        contributors = ledger.contributors().len(),
        commits = ledger.total_commits(),
        "aggregated contributions"
    );

    Ok(ContributorReport {
        repository: repo.to_string(),
        contributors: ledger.into_contributors(),
    })
}
