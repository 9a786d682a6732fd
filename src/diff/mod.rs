//! Diff engine: PR diff retrieval (libgit2 or GitHub API) and chunk splitting.

pub mod chunker;
pub mod git;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::github::{GithubClient, GithubError};
use crate::models::github::ApiPullRequest;
use crate::models::{DiffSource, RepoRef};

/// Errors from the diff engine.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("failed to open git repository at {path}: {source}")]
    OpenRepo {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error(
        "commit {0} is not available locally; fetch the full history \
         (e.g. `fetch-depth: 0` in actions/checkout) or use --diff-source api"
    )]
    MissingCommit(String),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Github(#[from] GithubError),
}

/// Produce the textual diff between a pull request's base and head.
///
/// The returned text is opaque to later stages; it is only chunked and
/// forwarded to the model.
pub async fn pull_request_diff(
    source: DiffSource,
    github: &GithubClient,
    repo: &RepoRef,
    pr: &ApiPullRequest,
    repo_path: &Path,
) -> Result<String, DiffError> {
    tracing::info!(
        %source,
        base = %pr.base.sha,
        head = %pr.head.sha,
        "computing pull request diff"
    );
    let diff = match source {
        DiffSource::Git => git::diff_commits(repo_path, &pr.base.sha, &pr.head.sha)?,
        DiffSource::Api => github.pull_diff(repo, pr.number).await?,
    };
    tracing::debug!(chars = diff.chars().count(), "diff computed");
    Ok(diff)
}
