//! Relevance index: cached relevant subset for the active file.

use crate::services::scorer;
use crate::types::Document;

/// Relevant documents for the current active file.
///
/// Two states: idle (no active file, nothing relevant) and scored
/// (active file `F`, relevant set `R`). The relevant set is always
/// replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevanceIndex {
    active: Option<String>,
    relevant: Vec<Document>,
}

impl RelevanceIndex {
    /// Creates an idle index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active file the relevant set was computed for.
    #[must_use]
    pub fn active_file(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Documents relevant to the active file, in document-set order.
    #[must_use]
    pub fn relevant(&self) -> &[Document] {
        &self.relevant
    }

    /// Switches to a new active file and rescores `documents`.
    ///
    /// An empty path is treated as no active file. Returns `false` without
    /// recomputing when the active file is unchanged.
    pub fn set_active_file(&mut self, active: Option<&str>, documents: &[Document]) -> bool {
        let active = active.filter(|path| !path.is_empty());
        if self.active.as_deref() == active {
            return false;
        }
        self.active = active.map(String::from);
        self.rescore(documents);
        true
    }

    /// Recomputes the relevant set against the current active file.
    ///
    /// Used after the document set changes, whether or not the active file
    /// did.
    pub fn rescore(&mut self, documents: &[Document]) {
        self.relevant = match &self.active {
            Some(active) => scorer::relevant_documents(active, documents),
            None => Vec::new(),
        };
    }
}
