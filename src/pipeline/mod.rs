//! End-to-end pipelines behind the `contributors` and `summarize` commands.
//!
//! Each pipeline fetches, aggregates and (for `summarize`) reviews, and
//! returns the report payload. Publishing is left to the caller.

pub mod contributors;
pub mod summarize;

pub use contributors::build_contributor_report;
pub use summarize::{SummaryOptions, SummaryRun, build_summary_report};

use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::diff::DiffError;
use crate::github::GithubError;
use crate::summary::SummaryError;

/// Errors from running a pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Github(#[from] GithubError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error("pull request #{0} has no commits")]
    NoCommits(u64),

    #[error("no commit of pull request #{pr} had usable statistics ({skipped} skipped)")]
    NoAuthorStats { pr: u64, skipped: usize },
}
