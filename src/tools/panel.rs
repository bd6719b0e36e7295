//! Document panel MCP tools: open a document, pick one from a list.
//!
//! Opening never fails at the tool level: unreadable or out-of-workspace
//! paths render as an error fragment inside the panel. See
//! [`crate::security`] for path confinement.

use crate::services::RenderedPanel;
use crate::session::Session;
use crate::view::{SelectorItem, NO_DOCUMENTS_NOTICE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input for the open_document tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct OpenDocumentInput {
    /// Absolute path, or path relative to the workspace root
    pub path: String,
}

/// Executes the open_document tool.
///
/// # Errors
///
/// Never fails; failures are reported through `RenderedPanel::ok`.
pub fn execute_open_document(
    session: &Session,
    input: OpenDocumentInput,
) -> Result<RenderedPanel, String> {
    Ok(session.open_document(&input.path))
}

/// Input for the open_panel_with_selector tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SelectorInput {
    /// 0-based index of the item to open (omit to list choices)
    #[serde(default)]
    pub choice: Option<usize>,
}

/// Output for the open_panel_with_selector tool.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SelectorOutput {
    /// Informational notice, e.g. nothing to choose from
    Notice { message: String },
    /// Items to choose from
    Choices { items: Vec<SelectorItem> },
    /// The chosen document, rendered
    Opened { panel: RenderedPanel },
}

/// Executes the open_panel_with_selector tool.
///
/// Lists the current documents, re-scanning first when none are known yet.
///
/// # Errors
///
/// Returns an error string if `choice` is out of range.
pub fn execute_selector(session: &Session, input: SelectorInput) -> Result<SelectorOutput, String> {
    let mut items = session.selector_items();
    if items.is_empty() {
        session.refresh();
        items = session.selector_items();
    }
    if items.is_empty() {
        return Ok(SelectorOutput::Notice {
            message: NO_DOCUMENTS_NOTICE.to_string(),
        });
    }

    match input.choice {
        None => Ok(SelectorOutput::Choices { items }),
        Some(index) => {
            let item = items.get(index).ok_or_else(|| {
                format!(
                    "Choice {index} out of range: {} documents available",
                    items.len()
                )
            })?;
            Ok(SelectorOutput::Opened {
                panel: session.open_document(&item.path),
            })
        }
    }
}
