//! Per-author commit statistics.
//!
//! Line-change counters are not part of the PR commit list, so every commit
//! is fetched individually. A commit whose detail response is unusable is
//! logged and skipped; the rest of the aggregation continues.

use indexmap::IndexMap;

use crate::github::{GithubClient, GithubError};
use crate::models::github::{ApiCommit, ApiCommitDetail};
use crate::models::{AuthorStats, PrimaryAuthor, RepoRef};

/// Why a commit detail could not be attributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unparseable(String),
    MissingAuthor,
    MissingStats,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Unparseable(e) => write!(f, "unparseable response: {e}"),
            SkipReason::MissingAuthor => write!(f, "no author"),
            SkipReason::MissingStats => write!(f, "no stats"),
        }
    }
}

/// Accumulates line-change statistics per author, in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct StatsLedger {
    authors: IndexMap<String, AuthorStats>,
    skipped: usize,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute one raw commit-detail response.
    pub fn record_detail(&mut self, detail: serde_json::Value) -> Result<(), SkipReason> {
        let detail: ApiCommitDetail = serde_json::from_value(detail)
            .map_err(|e| SkipReason::Unparseable(e.to_string()))?;
        let author = detail.author_login().ok_or(SkipReason::MissingAuthor)?;
        let stats = detail.stats.ok_or(SkipReason::MissingStats)?;

        let entry = self
            .authors
            .entry(author.to_string())
            .or_insert_with(|| AuthorStats::new(author));
        entry.commit_count += 1;
        entry.additions += stats.additions;
        entry.deletions += stats.deletions;
        entry.total += stats.total;
        Ok(())
    }

    /// Note a commit that was skipped.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn authors(&self) -> &IndexMap<String, AuthorStats> {
        &self.authors
    }

    /// Pick the author whose figures fill the report's top-level fields.
    pub fn primary(&self, mode: PrimaryAuthor) -> Option<&AuthorStats> {
        match mode {
            PrimaryAuthor::First => self.authors.values().next(),
            PrimaryAuthor::Top => self.authors.values().reduce(|best, candidate| {
                if candidate.commit_count > best.commit_count {
                    candidate
                } else {
                    best
                }
            }),
        }
    }

    pub fn into_authors(self) -> Vec<AuthorStats> {
        self.authors.into_values().collect()
    }
}

/// Fetch every commit's detail and accumulate per-author statistics.
///
/// Transport failures abort; error statuses and malformed bodies for a
/// single commit are skipped with a warning.
pub async fn collect_author_stats(
    github: &GithubClient,
    repo: &RepoRef,
    commits: &[ApiCommit],
) -> Result<StatsLedger, GithubError> {
    let mut ledger = StatsLedger::new();

    for commit in commits {
        let detail = match github.commit_detail(repo, &commit.sha).await {
            Ok(detail) => detail,
            Err(err @ (GithubError::Status { .. } | GithubError::Decode { .. })) => {
                tracing::warn!(sha = %commit.sha, "skipping commit: {err}");
                ledger.record_skip();
                continue;
            }
            Err(err) => return Err(err),
        };

        if let Err(reason) = ledger.record_detail(detail) {
            tracing::warn!(sha = %commit.sha, "skipping commit: {reason}");
            ledger.record_skip();
        }
    }

    tracing::info!(
        authors = ledger.authors().len(),
        skipped = ledger.skipped(),
        "collected commit statistics"
    );
    Ok(ledger)
}
