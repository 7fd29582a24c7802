//! Chunking engine.
//!
//! Splits a cleaned document into segments, either at Markdown headings or
//! with a fixed-size sliding window over characters. Identity and provenance
//! are stamped later by the parser.

mod helpers;
mod strategies;
mod types;

pub use helpers::source_label;
pub use strategies::{split, split_by_headers, split_by_size};
pub use types::Segment;
