//! Keyword tokenizer with a fixed English stop-word filter.
//!
//! Tokens are lowercase ASCII alphanumeric runs of at least
//! [`MIN_TOKEN_LEN`] characters. Order and multiplicity are irrelevant
//! downstream, so the result is a set.

use ahash::AHashSet;

/// Shortest token kept by [`tokenize`].
pub const MIN_TOKEN_LEN: usize = 3;

/// Common English words excluded from matching.
///
/// Words shorter than [`MIN_TOKEN_LEN`] are listed too; the length filter
/// already drops them but the list mirrors the full filter vocabulary.
pub const STOP_WORDS: &[&str] = &[
    "and", "the", "of", "for", "with", "from", "that", "this", "are", "was", "were", "has", "had",
    "have", "not", "but", "you", "your", "all", "any", "can", "will", "just", "out", "use", "one",
    "get", "like", "now", "how", "why", "who", "what", "when", "where", "which", "their", "about",
    "into", "more", "some", "them", "then", "than", "too", "very", "his", "her", "its", "our",
    "also", "did", "does", "doing", "on", "in", "to", "by", "as", "at", "be", "is", "it", "if",
    "or", "so", "an", "a",
];

/// Returns true if `word` (already lowercase) is a stop-word.
#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Splits `text` into the set of matchable tokens.
///
/// Text is lowercased, split on every run of characters outside
/// `[a-z0-9]`, and filtered by length and stop-words.
#[must_use]
pub fn tokenize(text: &str) -> AHashSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|word| word.len() >= MIN_TOKEN_LEN && !is_stop_word(word))
        .map(String::from)
        .collect()
}
