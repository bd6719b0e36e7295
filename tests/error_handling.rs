//! Sad path tests for error handling and edge cases.
//!
//! Tests missing folders, unreadable documents, out-of-workspace paths,
//! malformed configuration, and invalid tool input.

mod common;

use common::{research_workspace, TestEnv};
use std::fs;
use ux_insights::config::WORKSPACE_CONFIG_FILE;
use ux_insights::services::{scanner, DiscoveryPipeline, RenderService, ERROR_HEADING};
use ux_insights::tools::*;
use ux_insights::view::NO_DOCUMENTS_NOTICE;
use ux_insights::{InsightsConfig, Session};

// ============================================================================
// Missing Folder Tests
// ============================================================================

#[test]
fn test_scan_missing_folder_is_empty() {
    let env = TestEnv::new();
    assert!(scanner::scan(&env.root(), "./does-not-exist").is_empty());
}

#[test]
fn test_discover_with_only_missing_folders() {
    let env = TestEnv::new();
    let config = InsightsConfig {
        search_paths: vec!["./nope".into(), "./also-nope".into()],
        auto_detect: true,
    };
    assert!(DiscoveryPipeline::new(env.root(), config).discover().is_empty());
}

#[test]
fn test_folder_that_is_a_file_is_skipped() {
    let env = TestEnv::new();
    env.write_file("research", "not a directory");
    env.write_file_at("insights/a.md", "# A\n", 10);

    let docs = DiscoveryPipeline::new(env.root(), InsightsConfig::default()).discover();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "A");
}

#[test]
fn test_markdown_directory_is_not_a_document() {
    let env = TestEnv::new();
    env.mkdir("research/archive.md");
    env.write_file_at("research/real.md", "# Real\n", 10);

    let docs = scanner::scan(&env.root(), "./research");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "Real");
}

#[test]
fn test_invalid_utf8_document_still_listed() {
    let env = TestEnv::new();
    let path = env.root().join("research/binary.md");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"# Bin\xffary\n").unwrap();

    let docs = scanner::scan(&env.root(), "./research");
    assert_eq!(docs.len(), 1);
    assert!(docs[0].title.starts_with("Bin"));
}

// ============================================================================
// Render Error Tests
// ============================================================================

#[test]
fn test_render_nonexistent_path() {
    let env = TestEnv::new();
    let panel = RenderService::new().open(&env.root().join("gone.md"));

    assert!(!panel.ok);
    assert_eq!(panel.title, "gone.md");
    assert!(panel.html.contains(ERROR_HEADING));
    assert!(!panel.html.contains("<!DOCTYPE html>"));
}

#[test]
fn test_open_document_outside_workspace() {
    let env = research_workspace();
    let session = env.session();

    let panel = session.open_document("../../etc/passwd");
    assert!(!panel.ok);
    assert!(panel.html.contains(ERROR_HEADING));
    assert!(!panel.html.contains("root:"));
}

#[test]
fn test_open_document_absolute_outside_workspace() {
    let env = research_workspace();
    let other = TestEnv::new();
    let secret = other.write_file("secret.md", "# Secret\n");

    let panel = env.session().open_document(&secret.display().to_string());
    assert!(!panel.ok);
    assert!(!panel.html.contains("Secret"));
}

#[test]
fn test_open_document_missing_inside_workspace() {
    let env = research_workspace();
    let result = execute_open_document(
        &env.session(),
        OpenDocumentInput {
            path: "research/deleted.md".into(),
        },
    )
    .unwrap();

    assert!(!result.ok);
    assert!(result.html.contains(ERROR_HEADING));
}

// ============================================================================
// Session Open Tests
// ============================================================================

#[test]
fn test_open_with_malformed_workspace_config() {
    let env = TestEnv::new();
    env.write_file(WORKSPACE_CONFIG_FILE, "{ \"searchPaths\": [");

    let err = Session::open(&env.root(), None).unwrap_err();
    assert_eq!(err.code(), "CONFIG_PARSE_ERROR");
}

#[test]
fn test_open_with_missing_explicit_config() {
    let env = TestEnv::new();
    let missing = env.root().join("nowhere.json");

    let err = Session::open(&env.root(), Some(&missing)).unwrap_err();
    assert_eq!(err.code(), "CONFIG_READ_ERROR");
}

#[test]
fn test_open_with_file_as_root() {
    let env = TestEnv::new();
    let file = env.write_file("plain.txt", "hello");

    let err = Session::open(&file, None).unwrap_err();
    assert_eq!(err.code(), "NOT_A_DIRECTORY");
}

#[test]
fn test_open_with_nonexistent_root() {
    let env = TestEnv::new();
    let err = Session::open(&env.root().join("missing"), None).unwrap_err();
    assert_eq!(err.code(), "NOT_A_DIRECTORY");
}

#[test]
fn test_open_with_workspace_config_applies() {
    let env = research_workspace();
    env.write_file(
        WORKSPACE_CONFIG_FILE,
        r#"{ "searchPaths": ["./insights"], "autoDetect": false }"#,
    );

    let session = Session::open(&env.root(), None).unwrap();
    session.refresh();
    let titles: Vec<_> = session.documents().into_iter().map(|d| d.title).collect();
    assert_eq!(titles, vec!["pricing-notes.md"]);
}

// ============================================================================
// Tool Input Tests
// ============================================================================

#[test]
fn test_selector_on_empty_workspace() {
    let env = TestEnv::new();
    let result = execute_selector(&env.session(), SelectorInput::default()).unwrap();

    match result {
        SelectorOutput::Notice { message } => assert_eq!(message, NO_DOCUMENTS_NOTICE),
        other => panic!("expected notice, got {other:?}"),
    }
}

#[test]
fn test_selector_choice_out_of_range() {
    let env = research_workspace();
    let session = env.session();
    session.refresh();

    let err = execute_selector(&session, SelectorInput { choice: Some(99) }).unwrap_err();
    assert!(err.contains("99"));
    assert!(err.contains("out of range"));
}

#[test]
fn test_empty_active_file_clears_relevance() {
    let env = research_workspace();
    let session = env.session();
    session.refresh();
    session.set_active_file(Some("checkout-flow.ts"));
    assert!(!session.relevant().is_empty());

    let out = execute_set_active_file(
        &session,
        ActiveFileInput {
            path: Some(String::new()),
        },
    )
    .unwrap();
    assert!(out.changed);
    assert_eq!(out.active_file, None);
    assert!(out.relevant.is_empty());
    assert!(out.status.is_none());
}

#[test]
fn test_active_file_with_only_short_tokens() {
    let env = research_workspace();
    let session = env.session();
    session.refresh();

    session.set_active_file(Some("src/ab.rs"));
    assert!(session.relevant().is_empty());
}
