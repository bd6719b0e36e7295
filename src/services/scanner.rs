//! Markdown document scanner for a single search folder.

use crate::security::normalize_path;
use crate::types::Document;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Extension of research documents.
const MARKDOWN_EXT: &str = ".md";

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("heading regex is valid"))
}

/// Extracts the first level-1 heading (`# Title`) from markdown content.
///
/// Blank headings are skipped. Returns `None` when no line starts with
/// `#` followed by spaces and non-blank text.
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
    heading_regex().captures_iter(content).find_map(|caps| {
        let title = caps.get(1)?.as_str().trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Joins a search folder onto `root` and resolves `.` and `..` lexically.
///
/// `./docs/ux` under `/repo` resolves to `/repo/docs/ux`, and
/// `../shared-research` to `/shared-research`.
#[must_use]
pub fn resolve_folder(root: &Path, folder: &str) -> PathBuf {
    normalize_path(&root.join(folder))
}

/// Scans one search folder for markdown documents.
///
/// Lists the regular `.md` files directly inside `root/folder` in name
/// order. A missing or unreadable folder yields an empty list; an
/// unreadable file is skipped without affecting the rest of the folder.
#[must_use]
pub fn scan(root: &Path, folder: &str) -> Vec<Document> {
    let dir = resolve_folder(root, folder);

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping search folder {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            name.ends_with(MARKDOWN_EXT).then(|| (name, entry.path()))
        })
        .collect();
    files.sort();

    files
        .into_iter()
        .filter_map(|(name, path)| match read_document(&name, path) {
            Ok(doc) => Some(doc),
            Err((path, e)) => {
                tracing::debug!("Skipping document {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

fn read_document(name: &str, path: PathBuf) -> Result<Document, (PathBuf, std::io::Error)> {
    let read = || -> std::io::Result<(String, DateTime<Utc>)> {
        let modified = fs::metadata(&path)?.modified()?;
        let bytes = fs::read(&path)?;
        Ok((String::from_utf8_lossy(&bytes).into_owned(), modified.into()))
    };

    match read() {
        Ok((content, last_modified)) => Ok(Document {
            title: extract_title(&content).unwrap_or_else(|| name.to_string()),
            path,
            last_modified,
        }),
        Err(e) => Err((path, e)),
    }
}
