//! Prompt templates for chunk reviews and their condensation.

/// Condensation prompt used when the diff produced no chunks at all.
pub const NO_CHANGES_PROMPT: &str =
    "Say that you didn't find any relevant changes to comment on any file";

/// Used when the model answers the condensation request with nothing.
pub const EMPTY_SUMMARY_FALLBACK: &str = "No relevant changes were found to comment on.";

/// Build the reviewer persona sent as the preamble of every chunk review.
pub fn review_preamble(extra_prompt: Option<&str>) -> String {
    let mut preamble = String::from(
        "This is a pull request, or part of a pull request if the pull request is very large.\n\
        Review it as an excellent software engineer and an excellent security engineer.\n\
        Point out the issues in the differences and provide suggestions to improve them.\n\
        You may give a review summary and per-file issue comments if any major issues are found.\n\
        Always include the name of the file that the improvement or problem refers to.\n\
        The next message contains the difference between the GitHub file contents.\n",
    );

    if let Some(extra) = extra_prompt.map(str::trim).filter(|s| !s.is_empty()) {
        preamble.push('\n');
        preamble.push_str(extra);
        preamble.push('\n');
    }

    preamble
}

/// Build the request that condenses several chunk reviews into one digest.
pub fn summarize_prompt(word_limit: usize, reviews: &[String]) -> String {
    format!(
        "Can you summarize this for me?\n\
        Stick to highlighting pressing issues and providing code suggestions \
        to improve the pull request.\n\
        Summarize the review in a few sentences, no longer than {word_limit} words.\n\
        Here's what you need to summarize:\n\n{}",
        reviews.join("\n")
    )
}

/// Build the request sent when there was nothing to review.
pub fn no_changes_prompt() -> String {
    format!("{NO_CHANGES_PROMPT}\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preamble_without_extra_prompt() {
        let preamble = review_preamble(None);
        assert!(preamble.contains("security engineer"));
        assert!(preamble.contains("name of the file"));
    }

    #[test]
    fn preamble_appends_extra_prompt() {
        let preamble = review_preamble(Some("  Focus on SQL injection.  "));
        assert!(preamble.ends_with("\nFocus on SQL injection.\n"));
    }

    #[test]
    fn blank_extra_prompt_is_ignored() {
        assert_eq!(review_preamble(Some("   ")), review_preamble(None));
    }

    #[test]
    fn summarize_prompt_joins_reviews_with_newlines() {
        let reviews = vec!["first review".to_string(), "second review".to_string()];
        let prompt = summarize_prompt(256, &reviews);
        assert!(prompt.contains("no longer than 256 words"));
        assert!(prompt.ends_with("\n\nfirst review\nsecond review"));
    }

    #[test]
    fn no_changes_prompt_mentions_missing_changes() {
        assert!(no_changes_prompt().starts_with(NO_CHANGES_PROMPT));
    }
}
