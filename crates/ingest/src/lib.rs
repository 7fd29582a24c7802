//! Markdown collection and chunking.
//!
//! [`collector`] finds the Markdown files under a directory, [`MarkdownParser`]
//! turns them into [`Chunk`](recipe_core::Chunk)s and [`jsonl`] writes those out
//! one JSON object per line.

pub mod collector;
pub mod document;
pub mod jsonl;
pub mod parser;
pub mod traits;

pub use parser::MarkdownParser;
pub use traits::DocumentParser;
