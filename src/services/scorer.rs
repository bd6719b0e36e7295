//! Binary relevance scoring of a document against the active file.

use crate::services::tokenizer::tokenize;
use crate::types::{Document, Relevance};

/// Returns the active file's name stem used as the relevance query.
///
/// The basename is everything after the last `/` or `\`; the stem is the
/// part of it before the first `.`, so `checkout-flow.test.ts` yields
/// `checkout-flow`.
#[must_use]
pub fn file_stem(active_file: &str) -> &str {
    let base = active_file
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(active_file);
    base.split('.').next().unwrap_or(base)
}

/// Scores `document` against `active_file`.
///
/// [`Relevance::MATCH`] when the stem tokens of the active file share at
/// least one token with the document's title and path, else
/// [`Relevance::NONE`]. An active file with no usable tokens matches
/// nothing.
#[must_use]
pub fn score(active_file: &str, document: &Document) -> Relevance {
    let query = tokenize(file_stem(active_file));
    if query.is_empty() {
        return Relevance::NONE;
    }
    let candidate = tokenize(&document.match_text());
    Relevance::from_match(query.iter().any(|token| candidate.contains(token)))
}

/// Returns the documents relevant to `active_file`, in input order.
///
/// The query is tokenized once for the whole set.
#[must_use]
pub fn relevant_documents(active_file: &str, documents: &[Document]) -> Vec<Document> {
    let query = tokenize(file_stem(active_file));
    if query.is_empty() {
        return Vec::new();
    }
    documents
        .iter()
        .filter(|doc| {
            let candidate = tokenize(&doc.match_text());
            query.iter().any(|token| candidate.contains(token))
        })
        .cloned()
        .collect()
}
