//! ux-insights: research and UX insight documents for the file you are editing.
//!
//! Discovers markdown documents under a workspace's research folders,
//! ranks them against the active editor file by keyword overlap, and
//! renders a chosen document as HTML for a side panel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        MCP Server (rmcp)  /  CLI (clap)     │
//! │         JSON-RPC over stdin/stdout          │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │                  Tools                       │
//! │ refresh, set_active_file, view, open, select │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │                 Session                      │
//! │  snapshot · status · subscribers · watchers  │
//! └───────┬─────────┬─────────┬─────────────────┘
//!         │         │         │
//!    ┌────▼────┐ ┌──▼──────┐ ┌▼────────┐
//!    │Discovery│ │Relevance│ │ Render  │
//!    │detect + │ │tokenize │ │pulldown │
//!    │  scan   │ │ + score │ │ -cmark  │
//!    └─────────┘ └─────────┘ └─────────┘
//! ```

pub mod config;
pub mod error;
pub mod fmt;
pub mod security;
pub mod server;
pub mod services;
pub mod session;
pub mod tools;
pub mod types;
pub mod view;

pub use config::InsightsConfig;
pub use error::{Result, ServerError};
pub use session::{RefreshOutcome, Session, SessionEvent, Subscription};
pub use types::{Document, Relevance};
