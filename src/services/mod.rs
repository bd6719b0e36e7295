//! Core services: tokenizing, scoring, discovery, relevance and rendering.

pub mod detector;
mod discovery;
mod relevance;
mod render;
pub mod scanner;
pub mod scorer;
pub mod tokenizer;

pub use discovery::DiscoveryPipeline;
pub use relevance::RelevanceIndex;
pub use render::{RenderService, RenderedPanel, ERROR_HEADING};
