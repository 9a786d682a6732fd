//! Length-based chunk splitter for large diffs.
//!
//! Splits diff text into consecutive, non-overlapping pieces of at most
//! `chunk_size` characters so each piece fits a model's input limit. The
//! split ignores file and hunk boundaries; concatenating the chunks in order
//! reproduces the input exactly.

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// Sizes count Unicode scalar values, so multi-byte characters are never
/// cut. A `chunk_size` of zero is treated as one. Empty input yields no
/// chunks.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<&str> {
    let size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
