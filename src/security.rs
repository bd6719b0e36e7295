//! Path confinement for documents opened through the server.
//!
//! `open_document` accepts paths from an MCP client. Paths that are not
//! already listed documents are confined to the workspace root so a client
//! cannot use the render panel to display arbitrary files from the host.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Security-related errors.
#[derive(Error, Debug, Clone)]
pub enum SecurityError {
    #[error("Path traversal blocked: '{attempted}' escapes root '{}'", root.display())]
    PathTraversal { attempted: String, root: PathBuf },

    #[error("Workspace root '{path}' is not a directory")]
    NotADirectory { path: String },
}

impl SecurityError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathTraversal { .. } => "PATH_TRAVERSAL",
            Self::NotADirectory { .. } => "NOT_A_DIRECTORY",
        }
    }
}

/// Validates and canonicalizes a workspace root.
///
/// # Errors
///
/// Returns `SecurityError::NotADirectory` if the path does not exist or is
/// not a directory.
pub fn validate_workspace_root(path: &Path) -> Result<PathBuf, SecurityError> {
    match dunce::canonicalize(path) {
        Ok(canonical) if canonical.is_dir() => Ok(canonical),
        _ => Err(SecurityError::NotADirectory {
            path: path.display().to_string(),
        }),
    }
}

/// Validates that a document path stays within the workspace root.
///
/// Absolute paths are accepted when they resolve inside `root`; relative
/// paths are joined onto `root`. `.` and `..` are resolved before the
/// check, and existing paths are canonicalized so symlinks cannot escape.
///
/// # Example
///
/// ```
/// use ux_insights::security::validate_document_path;
/// use std::path::Path;
///
/// let root = Path::new("/project");
///
/// assert!(validate_document_path(root, "research/a.md").is_ok());
/// assert!(validate_document_path(root, "/project/research/a.md").is_ok());
///
/// assert!(validate_document_path(root, "../etc/passwd").is_err());
/// assert!(validate_document_path(root, "/etc/passwd").is_err());
/// ```
pub fn validate_document_path(root: &Path, user_path: &str) -> Result<PathBuf, SecurityError> {
    let traversal = || SecurityError::PathTraversal {
        attempted: user_path.to_string(),
        root: root.to_path_buf(),
    };

    let canonical_root = dunce::canonicalize(root).unwrap_or_else(|_| normalize_path(root));
    let requested = Path::new(user_path);
    let joined = if requested.is_absolute() {
        normalize_path(requested)
    } else {
        normalize_path(&canonical_root.join(requested))
    };

    if joined
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(traversal());
    }

    let resolved = if joined.exists() {
        dunce::canonicalize(&joined).map_err(|_| traversal())?
    } else {
        joined
    };

    // Absolute inputs may be spelled against the non-canonical root.
    if resolved.starts_with(&canonical_root) || resolved.starts_with(normalize_path(root)) {
        Ok(resolved)
    } else {
        Err(traversal())
    }
}

/// Normalizes a path by resolving `.` and `..` components without filesystem access.
///
/// Leading `..` components of a relative path are kept.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                match components.last() {
                    Some(Component::Normal(_)) => {
                        components.pop();
                    }
                    // `/..` is `/`
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => components.push(component),
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}
