//! Chunked review summarizer.
//!
//! The diff is split into bounded chunks, each chunk is reviewed by the
//! provider independently, and the chunk reviews are condensed into a
//! single digest when there is more than one of them.

pub mod prompt;

use thiserror::Error;

use crate::diff::chunker::chunk_text;
use crate::providers::{ProviderError, ReviewProvider};

/// Errors from the summarizer.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("review of diff chunk {index} of {total} failed")]
    ChunkReview {
        index: usize,
        total: usize,
        #[source]
        source: ProviderError,
    },

    #[error("condensing the chunk reviews failed")]
    Condense(#[source] ProviderError),
}

/// Result of reviewing a whole diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// One review per chunk, in chunk order.
    pub chunk_reviews: Vec<String>,
    /// Final digest. Equals the only chunk review when there was one chunk.
    pub summary: String,
}

impl ReviewOutcome {
    /// Render the outcome as a single markdown comment.
    pub fn formatted(&self) -> String {
        format_review(&self.summary, &self.chunk_reviews)
    }
}

/// Reviews a diff chunk by chunk through a [`ReviewProvider`].
pub struct ReviewSummarizer<'a> {
    provider: &'a dyn ReviewProvider,
    chunk_size: usize,
    word_limit: usize,
    extra_prompt: Option<String>,
}

impl<'a> ReviewSummarizer<'a> {
    pub fn new(provider: &'a dyn ReviewProvider, chunk_size: usize) -> Self {
        Self {
            provider,
            chunk_size,
            word_limit: crate::constants::DEFAULT_SUMMARY_WORDS,
            extra_prompt: None,
        }
    }

    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit;
        self
    }

    pub fn with_extra_prompt(mut self, extra_prompt: Option<String>) -> Self {
        self.extra_prompt = extra_prompt;
        self
    }

    /// Review every chunk of `diff` and condense the results.
    ///
    /// Issues one provider call per chunk, plus one condensation call unless
    /// the diff fit into exactly one chunk.
    pub async fn review(&self, diff: &str) -> Result<ReviewOutcome, SummaryError> {
        let chunks = chunk_text(diff, self.chunk_size);
        let total = chunks.len();
        let preamble = prompt::review_preamble(self.extra_prompt.as_deref());
        tracing::info!(chunks = total, chunk_size = self.chunk_size, "reviewing diff");

        let mut chunk_reviews = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!(chunk = i + 1, total, chars = chunk.chars().count(), "reviewing chunk");
            let review = self
                .provider
                .generate(Some(preamble.as_str()), chunk)
                .await
                .map_err(|source| SummaryError::ChunkReview {
                    index: i + 1,
                    total,
                    source,
                })?;
            chunk_reviews.push(review);
        }

        if let [only] = chunk_reviews.as_slice() {
            let summary = non_empty_or_fallback(only.clone());
            return Ok(ReviewOutcome {
                chunk_reviews,
                summary,
            });
        }

        let request = if chunk_reviews.is_empty() {
            prompt::no_changes_prompt()
        } else {
            prompt::summarize_prompt(self.word_limit, &chunk_reviews)
        };
        tracing::debug!(reviews = chunk_reviews.len(), "condensing chunk reviews");
        let summary = self
            .provider
            .generate(None, &request)
            .await
            .map_err(SummaryError::Condense)?;

        Ok(ReviewOutcome {
            chunk_reviews,
            summary: non_empty_or_fallback(summary),
        })
    }
}

fn non_empty_or_fallback(text: String) -> String {
    if text.trim().is_empty() {
        tracing::warn!("model returned an empty review; using fallback text");
        prompt::EMPTY_SUMMARY_FALLBACK.to_string()
    } else {
        text
    }
}

/// Combine the digest and chunk reviews into one markdown comment.
///
/// A single review is returned verbatim. Otherwise the digest is shown
/// first and the full chunk reviews sit in a collapsed `<details>` block.
pub fn format_review(summary: &str, reviews: &[String]) -> String {
    if reviews.len() == 1 {
        return summary.to_string();
    }
    format!(
        "<details>\n<summary>{summary}</summary>\n\n{}\n\n</details>",
        reviews.join("\n")
    )
}
