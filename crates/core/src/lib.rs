#![deny(missing_docs)]
//! Storyboard core: turns a markdown document into an ordered narration
//! script for short-video generation.
//!
//! Level-1 headings become title cards, paragraphs become voiceovers, and
//! each fenced code block absorbs the step before it as its narration,
//! with the block's language tag resolved to a file extension through a
//! static registry.

/// Core error types.
pub mod error;
/// Language registry and extension resolution.
pub mod languages;
/// Markdown parsing adapter.
pub mod parse;
/// The step model and its wire format.
pub mod steps;
/// Document walker producing the step script.
pub mod walk;

pub use error::{ScriptError, SourceLocation};
pub use languages::{LanguageDefinition, definitions, extension_for};
pub use parse::parse_document;
pub use steps::{Codeblock, Heading, Step, Steps, Voiceover};
pub use walk::markdown_to_steps;
