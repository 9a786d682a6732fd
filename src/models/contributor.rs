//! Per-invocation domain records built from GitHub responses.

use serde::{Deserialize, Serialize};

/// A commit attributed to its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub author_login: String,
}

/// Feedback a reviewer left on one of a contributor's commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub reviewer_id: String,
    pub comment: String,
}

/// Commit count and received review comments for one contributor.
///
/// Wire shape of an entry in the contributor report's `contributors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorSummary {
    pub github_id: String,
    pub commit_count: u32,
    pub review_comments: Vec<ReviewFeedback>,
}

impl ContributorSummary {
    /// Start a summary for an author first seen on a commit.
    pub fn new(github_id: impl Into<String>) -> Self {
        Self {
            github_id: github_id.into(),
            commit_count: 0,
            review_comments: Vec::new(),
        }
    }
}

/// Commit count and summed line changes for one author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub github_id: String,
    pub commit_count: u32,
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

impl AuthorStats {
    /// Empty accumulator for `github_id`.
    pub fn new(github_id: impl Into<String>) -> Self {
        Self {
            github_id: github_id.into(),
            ..Self::default()
        }
    }
}
