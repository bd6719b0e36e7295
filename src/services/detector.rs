//! Heuristic detection of research folders under a workspace root.

use std::fs;
use std::path::Path;

/// Directory-name fragments that mark a folder as research material.
pub const RESEARCH_KEYWORDS: &[&str] = &["research", "ux", "user-research", "insights"];

/// Name of the documentation folder searched one level deeper.
pub const DOCS_DIR: &str = "docs";

/// Returns true if a directory name looks like a research folder.
///
/// Matching is case-insensitive substring containment.
#[must_use]
pub fn is_research_dir(name: &str) -> bool {
    let name = name.to_lowercase();
    RESEARCH_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Detects research folders under `root`.
///
/// Returns relative paths such as `./research-notes` for matching
/// immediate subdirectories, followed by `./docs/<name>` for matches one
/// level inside a `docs` subdirectory. Never fails: I/O errors yield
/// whatever was gathered before them.
#[must_use]
pub fn detect(root: &Path) -> Vec<String> {
    let mut detected = Vec::new();

    let top = match subdirectories(root) {
        Ok(names) => names,
        Err(e) => {
            tracing::debug!("Folder detection skipped {}: {}", root.display(), e);
            return detected;
        }
    };

    detected.extend(
        top.iter()
            .filter(|name| is_research_dir(name))
            .map(|name| format!("./{name}")),
    );

    if top.iter().any(|name| name == DOCS_DIR) {
        match subdirectories(&root.join(DOCS_DIR)) {
            Ok(nested) => detected.extend(
                nested
                    .iter()
                    .filter(|name| is_research_dir(name))
                    .map(|name| format!("./{DOCS_DIR}/{name}")),
            ),
            Err(e) => tracing::debug!("Folder detection skipped {}/{}: {}", root.display(), DOCS_DIR, e),
        }
    }

    detected
}

/// Lists the names of immediate subdirectories, sorted.
///
/// Symlinks are not followed. Names that are not valid UTF-8 are skipped.
fn subdirectories(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detects_top_level_and_docs_folders() {
        let dir = TempDir::new().unwrap();
        for sub in ["research-notes", "src", "docs/ux-findings", "build"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }

        let detected = detect(dir.path());
        assert_eq!(detected, vec!["./research-notes", "./docs/ux-findings"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("UX-Lab")).unwrap();
        fs::create_dir_all(dir.path().join("Customer_Insights")).unwrap();

        let detected = detect(dir.path());
        assert_eq!(detected, vec!["./Customer_Insights", "./UX-Lab"]);
    }

    #[test]
    fn test_files_are_not_folders() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("research.md"), "# not a folder").unwrap();

        assert!(detect(dir.path()).is_empty());
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let dir = TempDir::new().unwrap();
        assert!(detect(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_docs_only_searched_one_level() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs/guides/research")).unwrap();

        assert!(detect(dir.path()).is_empty());
    }

    #[test]
    fn test_keyword_substrings() {
        assert!(is_research_dir("user-research"));
        assert!(is_research_dir("linux")); // "ux" substring, accepted heuristic
        assert!(!is_research_dir("src"));
        assert!(!is_research_dir("docs"));
    }
}
