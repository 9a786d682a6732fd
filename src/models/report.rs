//! Payloads posted to the reporting endpoint.
//!
//! The two pipelines use independent wire formats; they intentionally share
//! no schema.

use serde::{Deserialize, Serialize};

use super::contributor::{AuthorStats, ContributorSummary};

/// Body posted by `prscribe contributors` to `<endpoint>/api/v1/pr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorReport {
    /// Repository identifier (`owner/name`).
    pub repository: String,
    pub contributors: Vec<ContributorSummary>,
}

/// Body posted by `prscribe summarize` to `<endpoint>/pr`.
///
/// The top-level author fields describe the primary contributor; every
/// author's statistics are also listed under `contributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub repository: String,
    pub pr_number: u64,
    pub github_id: String,
    pub commit_count: u32,
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
    pub reviewers: Vec<String>,
    pub review_summary: String,
    pub contributors: Vec<AuthorStats>,
}
