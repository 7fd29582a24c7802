//! Per-document steps: reading, cleaning, path metadata and chunking.

pub mod chunker;
mod clean;
mod md;
mod paths;

pub use clean::clean_markdown;
pub use md::read_markdown;
pub use paths::{batch_root, category_and_name, relative_path, DocumentPath};
