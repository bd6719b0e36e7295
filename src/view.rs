//! Presentational view model for the side panel.
//!
//! Everything here is rebuilt wholesale from the current document set and
//! relevant subset; items carry no identity of their own.

use crate::types::Document;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::path::{Component, Path};

/// Label of the section listing documents relevant to the active file.
pub const RELEVANT_SECTION: &str = "Relevant to Current File";

/// Label of the section listing every discovered document.
pub const ALL_SECTION: &str = "All Research Files";

/// Label of the refresh action.
pub const REFRESH_LABEL: &str = "Refresh";

/// Notice shown when the selector has nothing to offer.
pub const NO_DOCUMENTS_NOTICE: &str = "No research files found.";

/// One row of the side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewItem {
    /// Re-runs discovery when activated.
    RefreshAction,
    /// Non-interactive section label.
    SectionHeader { label: String },
    /// A document; activating it opens the render panel.
    DocumentEntry {
        #[serde(flatten)]
        document: Document,
        /// `[folder] • date`
        description: String,
        /// Title and path on two lines.
        tooltip: String,
    },
}

impl ViewItem {
    fn header(label: &str) -> Self {
        Self::SectionHeader {
            label: label.to_string(),
        }
    }

    fn entry(root: &Path, document: &Document) -> Self {
        Self::DocumentEntry {
            description: describe(root, document),
            tooltip: format!("{}\n{}", document.title, document.path.display()),
            document: document.clone(),
        }
    }

    /// Display label of the item.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::RefreshAction => REFRESH_LABEL,
            Self::SectionHeader { label } => label,
            Self::DocumentEntry { document, .. } => &document.title,
        }
    }
}

/// Builds the panel rows.
///
/// Shape: refresh action; the relevant section only when `relevant` is
/// non-empty; then the all-documents section, whose header is present even
/// when `documents` is empty.
#[must_use]
pub fn build_items(root: &Path, documents: &[Document], relevant: &[Document]) -> Vec<ViewItem> {
    let mut items = Vec::with_capacity(documents.len() + relevant.len() + 3);
    items.push(ViewItem::RefreshAction);

    if !relevant.is_empty() {
        items.push(ViewItem::header(RELEVANT_SECTION));
        items.extend(relevant.iter().map(|d| ViewItem::entry(root, d)));
    }

    items.push(ViewItem::header(ALL_SECTION));
    items.extend(documents.iter().map(|d| ViewItem::entry(root, d)));
    items
}

/// One choice in the document pick-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorItem {
    /// Document title.
    pub label: String,
    /// `[folder] • date`
    pub description: String,
    /// Absolute path opened when chosen.
    pub path: String,
}

/// Builds the pick-list offered by the selector command.
#[must_use]
pub fn selector_items(root: &Path, documents: &[Document]) -> Vec<SelectorItem> {
    documents
        .iter()
        .map(|d| SelectorItem {
            label: d.title.clone(),
            description: describe(root, d),
            path: d.path.display().to_string(),
        })
        .collect()
}

/// Status-bar style indicator text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusText {
    pub text: String,
    pub tooltip: String,
    pub count: usize,
}

/// Returns the indicator for `relevant_count` relevant documents, or `None`
/// when the indicator should be hidden.
#[must_use]
pub fn status_text(relevant_count: usize) -> Option<StatusText> {
    if relevant_count == 0 {
        return None;
    }
    let plural = if relevant_count > 1 { "s" } else { "" };
    Some(StatusText {
        text: format!("Research Insight{plural} available"),
        tooltip: format!("Relevant research file{plural} for this file. Click to view."),
        count: relevant_count,
    })
}

/// `[folder] • YYYY-MM-DD` for a document.
///
/// `folder` is the first component of the path relative to `root`, or the
/// path's own first component when it lies outside `root`.
#[must_use]
pub fn describe(root: &Path, document: &Document) -> String {
    format!(
        "[{}] • {}",
        top_folder(root, &document.path),
        local_date(document.last_modified)
    )
}

fn top_folder(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .find_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .unwrap_or_default()
}

fn local_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}
