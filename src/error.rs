//! Error types for ux-insights.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation. Discovery and rendering never surface
//! errors to callers; these types cover configuration, workspace
//! validation, folder watching and tool output encoding.

use crate::security::SecurityError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level server error.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Security error: {0}")]
    Security(#[from] SecurityError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading errors.
///
/// A missing implicit layer is never an error; defaults are used instead.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Folder watching errors.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to watch {path}: {source}")]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Failed to create watcher: {0}")]
    Init(#[from] notify::Error),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Error code implementations for machine-readable error responses
impl ServerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Security(e) => e.code(),
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

impl ConfigError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ_ERROR",
            Self::Parse { .. } => "CONFIG_PARSE_ERROR",
        }
    }
}

impl WatchError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Notify { .. } => "WATCH_ERROR",
            Self::Init(_) => "WATCH_INIT_ERROR",
        }
    }
}

// Conversion to rmcp tool errors
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        rmcp::ErrorData::internal_error(err.to_string(), None)
    }
}
