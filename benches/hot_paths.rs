//! Performance benchmarks for ux-insights hot paths.
//!
//! Measures the operations that run on every editor focus change or rescan:
//! - Tokenizing file stems and document text
//! - Scoring the document set against an active file
//! - Discovery over a populated workspace
//! - Markdown rendering
//!
//! Run with: `cargo bench`
//! View reports: `open target/criterion/report/index.html`

use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use ux_insights::services::{scorer, tokenizer, DiscoveryPipeline, RenderService};
use ux_insights::{Document, InsightsConfig};

const TOPICS: &[&str] = &[
    "checkout", "onboarding", "search", "pricing", "billing", "profile", "settings", "navigation",
];

fn synthetic_documents(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            Document {
                title: format!("{topic} usability study round {i}"),
                path: PathBuf::from(format!("/workspace/research/{topic}-{i}.md")),
                last_modified: DateTime::<Utc>::UNIX_EPOCH,
            }
        })
        .collect()
}

// ============================================================================
// Tokenizer Benchmarks
// ============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    let inputs = [
        ("stem", "checkout-flow"),
        ("title_and_path", "Checkout Flow Research /workspace/research/checkout-flow.md"),
        (
            "long_text",
            "Participants struggled with the shipping address form; several abandoned \
             the checkout flow entirely when asked to create an account before payment",
        ),
    ];

    for (name, text) in inputs {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| black_box(tokenizer::tokenize(text)))
        });
    }

    group.finish();
}

// ============================================================================
// Relevance Benchmarks
// ============================================================================

/// Benchmarks relevance filtering at different document set sizes.
fn bench_relevant_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("relevant_documents");

    for size in [10, 100, 1_000] {
        let docs = synthetic_documents(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &docs, |b, docs| {
            b.iter(|| black_box(scorer::relevant_documents("src/components/checkout-flow.tsx", docs)))
        });
    }

    group.finish();
}

// ============================================================================
// Discovery Benchmarks
// ============================================================================

/// End-to-end discovery: detection, scanning, title extraction, sorting.
fn bench_discover(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");
    group.sample_size(50); // File system bound

    let dir = TempDir::new().expect("Failed to create temp dir");
    for folder in ["research", "docs/ux", "user-research-archive"] {
        fs::create_dir_all(dir.path().join(folder)).expect("Failed to create folder");
    }
    for i in 0..200 {
        let folder = ["research", "docs/ux", "user-research-archive"][i % 3];
        let topic = TOPICS[i % TOPICS.len()];
        let content = format!(
            "Summary notes.\n\n# {topic} findings {i}\n\n- Insight one\n- Insight two\n"
        );
        fs::write(dir.path().join(folder).join(format!("{topic}-{i}.md")), content)
            .expect("Failed to write file");
    }

    let pipeline = DiscoveryPipeline::new(dir.path().to_path_buf(), InsightsConfig::default());

    group.throughput(Throughput::Elements(200));
    group.bench_function("discover_200_files", |b| b.iter(|| black_box(pipeline.discover())));

    group.finish();
}

// ============================================================================
// Render Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let mut markdown = String::from("# Checkout Flow Research\n\n");
    for i in 0..50 {
        markdown.push_str(&format!(
            "## Finding {i}\n\nUsers **hesitated** at step {i}.\n\n| user | quote |\n|---|---|\n| P{i} | \"unclear\" |\n\n"
        ));
    }

    let render = RenderService::new();
    group.throughput(Throughput::Bytes(markdown.len() as u64));
    group.bench_function("render_50_sections", |b| {
        b.iter(|| black_box(render.render(&markdown)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_relevant_documents,
    bench_discover,
    bench_render,
);

criterion_main!(benches);
