//! Document-set MCP tools: refresh, active file, view model, status.

use crate::session::{RefreshOutcome, Session};
use crate::types::Document;
use crate::view::{StatusText, ViewItem};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input for the refresh_documents tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct RefreshInput {}

/// Output for the refresh_documents tool.
#[derive(Debug, Serialize)]
pub struct RefreshOutput {
    /// Whether this call ran the rescan or was folded into a running one
    #[serde(flatten)]
    pub outcome: RefreshOutcome,
    /// Folders now watched for changes
    pub watched_folders: Vec<String>,
}

/// Executes the refresh_documents tool.
///
/// # Errors
///
/// Never fails; discovery is best-effort per folder.
pub fn execute_refresh(session: &Session, _input: RefreshInput) -> Result<RefreshOutput, String> {
    let outcome = session.refresh();
    Ok(RefreshOutput {
        outcome,
        watched_folders: session
            .watched_folders()
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    })
}

/// Input for the set_active_file tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ActiveFileInput {
    /// Path of the file focused in the editor (omit when no file is open)
    #[serde(default)]
    pub path: Option<String>,
}

/// Output for the set_active_file tool.
#[derive(Debug, Serialize)]
pub struct ActiveFileOutput {
    /// Active file relevance is computed for
    pub active_file: Option<String>,
    /// False when the active file was already current
    pub changed: bool,
    /// Documents relevant to the active file
    pub relevant: Vec<Document>,
    /// Status indicator, absent when nothing is relevant
    pub status: Option<StatusText>,
}

/// Executes the set_active_file tool.
///
/// # Errors
///
/// Never fails.
pub fn execute_set_active_file(
    session: &Session,
    input: ActiveFileInput,
) -> Result<ActiveFileOutput, String> {
    let changed = session.set_active_file(input.path.as_deref());
    Ok(ActiveFileOutput {
        active_file: session.active_file(),
        changed,
        relevant: session.relevant(),
        status: session.status(),
    })
}

/// Input for the view_items tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ViewInput {}

/// Output for the view_items tool.
#[derive(Debug, Serialize)]
pub struct ViewOutput {
    /// Panel rows in display order
    pub items: Vec<ViewItem>,
    /// Status indicator, absent when nothing is relevant
    pub status: Option<StatusText>,
}

/// Executes the view_items tool.
///
/// # Errors
///
/// Never fails.
pub fn execute_view(session: &Session, _input: ViewInput) -> Result<ViewOutput, String> {
    Ok(ViewOutput {
        items: session.view_items(),
        status: session.status(),
    })
}

/// Output for the status tool.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    /// Whether the indicator is shown
    pub visible: bool,
    /// Indicator contents when shown
    pub status: Option<StatusText>,
}

/// Executes the status tool.
///
/// # Errors
///
/// Never fails.
pub fn execute_status(session: &Session) -> Result<StatusOutput, String> {
    let status = session.status();
    Ok(StatusOutput {
        visible: status.is_some(),
        status,
    })
}
