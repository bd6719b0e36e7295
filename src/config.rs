//! Layered configuration.
//!
//! Sources, later wins per key:
//! 1. built-in defaults
//! 2. user file `<config_dir>/ux-insights/config.json`
//! 3. workspace file `<root>/.ux-insights.json`
//! 4. an explicit file passed with `--config`
//!
//! Missing files are skipped silently. Keys use the camelCase names
//! editors store settings under (`searchPaths`, `autoDetect`).

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace-local configuration file name.
pub const WORKSPACE_CONFIG_FILE: &str = ".ux-insights.json";

/// Search paths used when none are configured.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "./research-insights",
    "./docs/research",
    "./docs/ux",
    "./research",
    "./user-research",
    "./insights",
];

/// Resolved configuration for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsConfig {
    /// Folders, relative to the workspace root, scanned for documents.
    pub search_paths: Vec<String>,
    /// Union heuristically detected research folders into `search_paths`.
    pub auto_detect: bool,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(|s| (*s).to_string()).collect(),
            auto_detect: true,
        }
    }
}

/// One configuration layer; absent keys leave the lower layer untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigLayer {
    search_paths: Option<Vec<String>>,
    auto_detect: Option<bool>,
}

impl InsightsConfig {
    /// Loads configuration for `root` from all layers.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if any present file is malformed, or
    /// `ConfigError::Read` if it exists but cannot be read. A missing
    /// explicit file is a read error; missing implicit files are not.
    pub fn load(root: &Path, explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(user) = user_config_path() {
            config.apply_file(&user, false)?;
        }
        config.apply_file(&root.join(WORKSPACE_CONFIG_FILE), false)?;
        if let Some(path) = explicit {
            config.apply_file(path, true)?;
        }

        Ok(config)
    }

    /// Parses a single JSON document over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if `json` is malformed.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply(parse_layer(Path::new("<inline>"), json)?);
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path, required: bool) -> ConfigResult<()> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => return Ok(()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        tracing::debug!("Loading config layer {}", path.display());
        self.apply(parse_layer(path, &json)?);
        Ok(())
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(paths) = layer.search_paths {
            self.search_paths = paths;
        }
        if let Some(auto_detect) = layer.auto_detect {
            self.auto_detect = auto_detect;
        }
    }
}

fn parse_layer(path: &Path, json: &str) -> ConfigResult<ConfigLayer> {
    serde_json::from_str(json).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Location of the per-user configuration file, if the platform has one.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ux-insights").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = InsightsConfig::default();
        assert_eq!(config.search_paths.len(), 6);
        assert_eq!(config.search_paths[0], "./research-insights");
        assert!(config.auto_detect);
    }

    #[test]
    fn test_partial_layer_keeps_other_defaults() {
        let config = InsightsConfig::from_json(r#"{"autoDetect": false}"#).unwrap();
        assert!(!config.auto_detect);
        assert_eq!(config.search_paths, InsightsConfig::default().search_paths);

        let config = InsightsConfig::from_json(r#"{"searchPaths": ["./notes"]}"#).unwrap();
        assert_eq!(config.search_paths, vec!["./notes"]);
        assert!(config.auto_detect);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = InsightsConfig::from_json(r#"{"searchPaths": "./notes"}"#).unwrap_err();
        assert_eq!(err.code(), "CONFIG_PARSE_ERROR");
    }

    #[test]
    fn test_explicit_file_overrides_workspace_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(WORKSPACE_CONFIG_FILE),
            r#"{"searchPaths": ["./workspace"], "autoDetect": false}"#,
        )
        .unwrap();
        let explicit = dir.path().join("override.json");
        fs::write(&explicit, r#"{"searchPaths": ["./explicit"]}"#).unwrap();

        let config = InsightsConfig::load(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.search_paths, vec!["./explicit"]);
        assert!(!config.auto_detect);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = InsightsConfig::load(dir.path(), Some(&dir.path().join("missing.json")))
            .unwrap_err();
        assert_eq!(err.code(), "CONFIG_READ_ERROR");
    }
}
