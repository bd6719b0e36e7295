//! Markdown to HTML rendering for the document panel.
//!
//! Conversion is delegated to `pulldown-cmark`; this module wraps the
//! output in a fixed style template and turns read failures into an
//! inline error fragment so the panel never fails.

use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::escape_html;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Heading of the fragment shown when a document cannot be loaded.
pub const ERROR_HEADING: &str = "Error loading file";

/// Default title of the panel before a document is loaded.
pub const PANEL_TITLE: &str = "Research Insight";

const STYLE: &str = r#"
        body {
            font-family: var(--vscode-font-family, system-ui, sans-serif);
            line-height: 1.6;
            color: var(--vscode-foreground, #1f2328);
            background-color: var(--vscode-editor-background, #ffffff);
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }
        h1 {
            color: var(--vscode-textLink-foreground, #0969da);
            border-bottom: 2px solid var(--vscode-textLink-foreground, #0969da);
        }
        h2 {
            color: var(--vscode-textPreformat-foreground, #57606a);
            margin-top: 30px;
        }
        table {
            border-collapse: collapse;
        }
        th, td {
            border: 1px solid var(--vscode-panel-border, #d0d7de);
            padding: 4px 8px;
        }
"#;

/// Contents of the document panel after opening a path.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPanel {
    /// Panel title: the document's file name.
    pub title: String,
    /// Path that was opened.
    pub path: String,
    /// Full HTML page, or an error fragment when `ok` is false.
    pub html: String,
    /// Whether the document was read successfully.
    pub ok: bool,
}

/// Stateless markdown renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderService;

impl RenderService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Converts markdown text to a complete, styled HTML page.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut body = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut body, Parser::new_ext(markdown, options));

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <style>{STYLE}    </style>\n</head>\n<body>\n{body}</body>\n</html>\n"
        )
    }

    /// Renders the error fragment shown in place of a document.
    #[must_use]
    pub fn error_fragment(&self, message: &str) -> String {
        let mut escaped = String::with_capacity(message.len());
        let _ = escape_html(&mut escaped, message);
        format!("<h2>{ERROR_HEADING}</h2><pre>{escaped}</pre>")
    }

    /// Reads and renders the document at `path`.
    ///
    /// Never fails: a read error produces an error fragment with
    /// `ok = false`.
    #[must_use]
    pub fn open(&self, path: &Path) -> RenderedPanel {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| PANEL_TITLE.to_string());

        match fs::read(path) {
            Ok(bytes) => RenderedPanel {
                title,
                path: path.display().to_string(),
                html: self.render(&String::from_utf8_lossy(&bytes)),
                ok: true,
            },
            Err(e) => {
                tracing::debug!("Failed to open {}: {}", path.display(), e);
                RenderedPanel {
                    title,
                    path: path.display().to_string(),
                    html: self.error_fragment(&format!("{}: {e}", path.display())),
                    ok: false,
                }
            }
        }
    }
}
