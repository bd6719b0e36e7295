//! Human-friendly CLI output formatters.
//!
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::services::RenderedPanel;
use crate::types::Document;
use crate::view::{SelectorItem, StatusText, ViewItem};
use owo_colors::OwoColorize;
use std::io::{self, Write};

// ── panel ───────────────────────────────────────────────────────────────────

pub fn fmt_view(w: &mut impl Write, items: &[ViewItem], color: bool) -> io::Result<()> {
    for item in items {
        match item {
            ViewItem::RefreshAction => {
                if color {
                    writeln!(w, "{}", "⟳ Refresh".dimmed())?;
                } else {
                    writeln!(w, "⟳ Refresh")?;
                }
            }
            ViewItem::SectionHeader { label } => {
                writeln!(w)?;
                if color {
                    writeln!(w, "{}", label.bold())?;
                } else {
                    writeln!(w, "{label}")?;
                }
            }
            ViewItem::DocumentEntry {
                document,
                description,
                ..
            } => {
                if color {
                    writeln!(w, "  {}  {}", document.title, description.dimmed())?;
                } else {
                    writeln!(w, "  {}  {}", document.title, description)?;
                }
            }
        }
    }
    Ok(())
}

// ── status ──────────────────────────────────────────────────────────────────

pub fn fmt_status(w: &mut impl Write, status: Option<&StatusText>, color: bool) -> io::Result<()> {
    match status {
        Some(s) if color => writeln!(w, "{} ({})", s.text.yellow(), s.count),
        Some(s) => writeln!(w, "{} ({})", s.text, s.count),
        None => Ok(()),
    }
}

// ── relevant ────────────────────────────────────────────────────────────────

pub fn fmt_relevant(
    w: &mut impl Write,
    active: &str,
    relevant: &[Document],
    color: bool,
) -> io::Result<()> {
    if relevant.is_empty() {
        return writeln!(w, "No research files relevant to {active}");
    }
    for doc in relevant {
        if color {
            writeln!(w, "{}  {}", doc.title.bold(), doc.path.display().dimmed())?;
        } else {
            writeln!(w, "{}  {}", doc.title, doc.path.display())?;
        }
    }
    Ok(())
}

// ── selector ────────────────────────────────────────────────────────────────

pub fn fmt_selector(w: &mut impl Write, items: &[SelectorItem], color: bool) -> io::Result<()> {
    for (i, item) in items.iter().enumerate() {
        if color {
            writeln!(
                w,
                "{} {}  {}",
                format_args!("{i:>3})").green(),
                item.label,
                item.description.dimmed()
            )?;
        } else {
            writeln!(w, "{i:>3}) {}  {}", item.label, item.description)?;
        }
    }
    Ok(())
}

// ── render ──────────────────────────────────────────────────────────────────

pub fn fmt_panel(w: &mut impl Write, panel: &RenderedPanel) -> io::Result<()> {
    writeln!(w, "{}", panel.html)
}

// ── detect ──────────────────────────────────────────────────────────────────

pub fn fmt_paths(w: &mut impl Write, paths: &[String], color: bool) -> io::Result<()> {
    for path in paths {
        if color {
            writeln!(w, "{}", path.cyan())?;
        } else {
            writeln!(w, "{path}")?;
        }
    }
    Ok(())
}
