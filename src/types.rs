//! Core domain types for ux-insights.
//!
//! These newtypes provide compile-time safety and semantic clarity
//! for core domain concepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A discovered markdown file treated as a candidate research artifact.
///
/// Documents are created fresh on every scan and never mutated; the
/// session swaps the whole set when a scan completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// First level-1 heading in the file, else the file name.
    pub title: String,
    /// Absolute path of the file.
    pub path: PathBuf,
    /// File modification time.
    pub last_modified: DateTime<Utc>,
}

impl Document {
    /// Text the relevance scorer matches against: title, then path.
    #[must_use]
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.path.display())
    }
}

/// Binary relevance of a document to the active file.
///
/// Only two values exist: [`Relevance::NONE`] and [`Relevance::MATCH`].
/// There is no partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relevance(u8);

impl Relevance {
    /// No shared token.
    pub const NONE: Self = Self(0);

    /// At least one shared token.
    pub const MATCH: Self = Self(100);

    #[must_use]
    pub const fn from_match(matched: bool) -> Self {
        if matched {
            Self::MATCH
        } else {
            Self::NONE
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_relevant(self) -> bool {
        self.0 > 0
    }
}

impl Default for Relevance {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Compile-time assertions for thread safety.
// The session shares these across the watcher thread and tool tasks.
#[cfg(test)]
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Document>();
    assert_send_sync::<Relevance>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_values() {
        assert_eq!(Relevance::from_match(true).as_u8(), 100);
        assert_eq!(Relevance::from_match(false).as_u8(), 0);
        assert!(Relevance::MATCH.is_relevant());
        assert!(!Relevance::default().is_relevant());
    }

    #[test]
    fn test_match_text_joins_title_and_path() {
        let doc = Document {
            title: "Checkout Flow Research".into(),
            path: PathBuf::from("/repo/research/checkout-flow.md"),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
        };
        assert_eq!(
            doc.match_text(),
            "Checkout Flow Research /repo/research/checkout-flow.md"
        );
    }
}
