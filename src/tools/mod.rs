//! MCP tool implementations.

mod documents;
mod panel;

// documents
pub use documents::{
    execute_refresh, execute_set_active_file, execute_status, execute_view, ActiveFileInput,
    ActiveFileOutput, RefreshInput, RefreshOutput, StatusOutput, ViewInput, ViewOutput,
};

// panel
pub use panel::{
    execute_open_document, execute_selector, OpenDocumentInput, SelectorInput, SelectorOutput,
};
