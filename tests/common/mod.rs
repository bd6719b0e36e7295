//! Common test utilities for ux-insights integration tests.
//!
//! Provides `TestEnv` for setting up isolated workspaces with research
//! folders and controlled modification times.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use ux_insights::{InsightsConfig, Session};

/// An isolated workspace root.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// Creates a new empty workspace.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Workspace root, canonicalized so paths compare equal to scan output.
    pub fn root(&self) -> PathBuf {
        dunce::canonicalize(self.dir.path()).expect("Failed to canonicalize temp directory")
    }

    /// Writes a file relative to the workspace root.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Writes a file and sets its modification time to `secs` after the epoch.
    pub fn write_file_at(&self, name: &str, content: &str, secs: u64) -> PathBuf {
        let path = self.write_file(name, content);
        let file = File::options()
            .write(true)
            .open(&path)
            .expect("Failed to reopen test file");
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .expect("Failed to set modification time");
        path
    }

    /// Creates an empty directory relative to the workspace root.
    pub fn mkdir(&self, name: &str) {
        fs::create_dir_all(self.root().join(name)).expect("Failed to create directory");
    }

    /// Session over this workspace with default configuration.
    pub fn session(&self) -> Session {
        Session::new(self.root(), InsightsConfig::default())
    }

    /// Session with explicit search paths and auto-detection setting.
    pub fn session_with(&self, paths: &[&str], auto_detect: bool) -> Session {
        Session::new(
            self.root(),
            InsightsConfig {
                search_paths: paths.iter().map(|s| (*s).to_string()).collect(),
                auto_detect,
            },
        )
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a workspace with research in default and auto-detected folders.
///
/// Modification times, newest first: onboarding, checkout, search, pricing.
pub fn research_workspace() -> TestEnv {
    let env = TestEnv::new();

    env.write_file_at(
        "research/checkout-flow.md",
        "# Checkout Flow Research\n\nUsers abandon at the shipping step.\n",
        3_000,
    );
    env.write_file_at(
        "docs/ux/search.md",
        "Intro paragraph before any heading.\n\n# Search Usability\n",
        2_000,
    );
    env.write_file_at("insights/pricing-notes.md", "no heading at all\n", 1_000);
    env.write_file_at(
        "research-notes/onboarding.md",
        "# Onboarding Interviews\n\n| user | quote |\n|---|---|\n| P1 | \"confusing\" |\n",
        4_000,
    );

    // Noise that must never be discovered
    env.write_file("src/checkout-flow.ts", "export const x = 1;\n");
    env.write_file("research/notes.txt", "# Not markdown\n");
    env.write_file("README.md", "# Project readme\n");

    env
}

/// Titles of `docs`, in order.
pub fn titles(docs: &[ux_insights::Document]) -> Vec<&str> {
    docs.iter().map(|d| d.title.as_str()).collect()
}
