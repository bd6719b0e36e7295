//! Discovery pipeline: search-path resolution plus folder scanning.

use crate::config::InsightsConfig;
use crate::services::{detector, scanner};
use crate::types::Document;
use std::path::{Path, PathBuf};

/// Produces the full candidate document set for one workspace root.
#[derive(Debug, Clone)]
pub struct DiscoveryPipeline {
    root: PathBuf,
    config: InsightsConfig,
}

impl DiscoveryPipeline {
    /// Creates a pipeline for `root` using `config`.
    pub fn new(root: PathBuf, config: InsightsConfig) -> Self {
        Self { root, config }
    }

    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Resolves the folders to scan.
    ///
    /// Configured paths come first, then detected paths when auto-detection
    /// is enabled. Exact duplicates are dropped, keeping the first.
    pub fn search_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::with_capacity(self.config.search_paths.len());
        let detected = if self.config.auto_detect {
            detector::detect(&self.root)
        } else {
            Vec::new()
        };

        for path in self.config.search_paths.iter().chain(detected.iter()) {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        paths
    }

    /// Scans every search path and returns all documents, newest first.
    ///
    /// The sort is stable: documents with equal modification times keep
    /// their scan order. A file reachable through two overlapping search
    /// paths is listed once per path.
    pub fn discover(&self) -> Vec<Document> {
        self.scan_paths(&self.search_paths())
    }

    /// Scans already-resolved search paths, newest first.
    pub fn scan_paths(&self, paths: &[String]) -> Vec<Document> {
        let mut documents: Vec<Document> = paths
            .iter()
            .flat_map(|folder| scanner::scan(&self.root, folder))
            .collect();
        documents.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        tracing::info!(
            "Discovered {} documents across {} search paths under {}",
            documents.len(),
            paths.len(),
            self.root.display()
        );
        documents
    }
}
