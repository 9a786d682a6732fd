//! Commit and review-comment aggregation.
//!
//! [`ContributionLedger`] holds the state of one contributor-report run:
//! which author wrote which commit, how many commits each author has, and
//! which review comments were left on their commits. Authors are discovered
//! only from commits, so every contributor has at least one commit.

use indexmap::IndexMap;
use thiserror::Error;

use crate::models::github::{ApiCommit, ApiReviewComment};
use crate::models::{CommitRecord, ContributorSummary, ReviewFeedback};

/// Errors while aggregating contributions.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregateError {
    #[error("commit {sha} has no author login or git author name")]
    MissingAuthor { sha: String },
}

/// Outcome of offering one review comment to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentDisposition {
    /// Attributed to the author of the commented commit.
    Attributed,
    /// Written by one of the PR's commit authors.
    SelfComment,
    /// References a commit that is not part of the PR.
    UnknownCommit,
    /// Left by a deleted account.
    NoReviewer,
}

/// Per-invocation accumulator for the contributor report.
#[derive(Debug, Default, Clone)]
pub struct ContributionLedger {
    commit_authors: IndexMap<String, String>,
    contributors: IndexMap<String, ContributorSummary>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one commit and credit it to its author.
    ///
    /// A SHA seen twice is only counted once.
    pub fn record_commit(&mut self, commit: CommitRecord) {
        if self.commit_authors.contains_key(&commit.sha) {
            return;
        }
        let summary = self
            .contributors
            .entry(commit.author_login.clone())
            .or_insert_with(|| ContributorSummary::new(&commit.author_login));
        summary.commit_count += 1;
        self.commit_authors.insert(commit.sha, commit.author_login);
    }

    /// Record every commit of the PR's commit list.
    pub fn record_commits(&mut self, commits: &[ApiCommit]) -> Result<(), AggregateError> {
        for commit in commits {
            let author = commit
                .author_login()
                .ok_or_else(|| AggregateError::MissingAuthor {
                    sha: commit.sha.clone(),
                })?;
            self.record_commit(CommitRecord {
                sha: commit.sha.clone(),
                author_login: author.to_string(),
            });
        }
        Ok(())
    }

    /// Offer a review comment to the ledger.
    pub fn record_review_comment(&mut self, comment: &ApiReviewComment) -> CommentDisposition {
        let Some(reviewer) = comment.user.as_ref().map(|u| u.login.as_str()) else {
            return CommentDisposition::NoReviewer;
        };
        if self.is_commit_author(reviewer) {
            return CommentDisposition::SelfComment;
        }
        let Some(author) = self.commit_authors.get(&comment.original_commit_id) else {
            return CommentDisposition::UnknownCommit;
        };
        if let Some(summary) = self.contributors.get_mut(author) {
            summary.review_comments.push(ReviewFeedback {
                reviewer_id: reviewer.to_string(),
                comment: comment.body.clone(),
            });
        }
        CommentDisposition::Attributed
    }

    /// Offer every review comment, logging the ones that are dropped.
    pub fn record_review_comments(&mut self, comments: &[ApiReviewComment]) {
        for comment in comments {
            match self.record_review_comment(comment) {
                CommentDisposition::Attributed => {}
                CommentDisposition::SelfComment => tracing::debug!(
                    commit = %comment.original_commit_id,
                    "skipping comment written by a commit author"
                ),
                CommentDisposition::UnknownCommit => tracing::debug!(
                    commit = %comment.original_commit_id,
                    "skipping comment on a commit outside the pull request"
                ),
                CommentDisposition::NoReviewer => tracing::debug!(
                    commit = %comment.original_commit_id,
                    "skipping comment without an author"
                ),
            }
        }
    }

    /// Whether `login` authored at least one commit in the PR.
    pub fn is_commit_author(&self, login: &str) -> bool {
        self.contributors.contains_key(login)
    }

    /// Commit SHA → author login, in commit order.
    pub fn commit_authors(&self) -> &IndexMap<String, String> {
        &self.commit_authors
    }

    /// Author login → accumulated summary, in order of first commit.
    pub fn contributors(&self) -> &IndexMap<String, ContributorSummary> {
        &self.contributors
    }

    pub fn total_commits(&self) -> usize {
        self.commit_authors.len()
    }

    /// Consume the ledger into the report's contributor list.
    pub fn into_contributors(self) -> Vec<ContributorSummary> {
        self.contributors.into_values().collect()
    }
}
