use serde::{Deserialize, Serialize};

/// Chunk size used when the caller passes zero or a negative value.
pub const DEFAULT_CHUNK_SIZE: usize = 1200;

/// Lower bound on the window length when splitting by size.
pub const MIN_SIZE_CHUNK: usize = 200;

/// A cleaned segment of one Markdown document plus its provenance.
///
/// Field names and order are the JSONL contract with downstream indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// `chunk-<n>`, unique within one parse batch.
    pub id: String,
    /// `doc-<n>`, one per source file in the batch.
    pub doc_id: String,
    /// 0-based position within the document.
    pub index: usize,
    /// Heading line for header-split chunks, `# chunk <n>` for size-split ones.
    pub header: String,
    pub text: String,
    /// Relative path, optionally suffixed with `|<RFC3339 UTC timestamp>`.
    pub source: String,
    /// First path segment of `path`, empty for top-level files.
    pub category: String,
    /// File base name without extension.
    pub name: String,
    pub path: String,
}

impl Chunk {
    /// The `source` field without the optional timestamp suffix.
    pub fn source_path(&self) -> &str {
        match self.source.rsplit_once('|') {
            Some((path, ts)) if chrono::DateTime::parse_from_rfc3339(ts).is_ok() => path,
            _ => &self.source,
        }
    }
}

/// Parsing behaviour requested by the caller, before normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Split on Markdown headings instead of fixed-size windows.
    pub by_header: bool,
    /// Window length in characters; `<= 0` means the default.
    pub chunk_size: i64,
    /// Characters shared by adjacent windows; negative means none.
    pub overlap: i64,
    /// Append the emission time to every chunk's `source`.
    pub timestamp: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            by_header: true,
            chunk_size: DEFAULT_CHUNK_SIZE as i64,
            overlap: 100,
            timestamp: false,
        }
    }
}

impl ParseOptions {
    /// Apply defaults and floors.
    ///
    /// In size mode the window is at least [`MIN_SIZE_CHUNK`] and the overlap
    /// is clamped below the window so every step advances.
    pub fn normalized(&self) -> NormalizedOptions {
        let mut chunk_size = if self.chunk_size <= 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            usize::try_from(self.chunk_size).unwrap_or(usize::MAX)
        };
        let mut overlap = usize::try_from(self.overlap.max(0)).unwrap_or(usize::MAX);
        if !self.by_header {
            chunk_size = chunk_size.max(MIN_SIZE_CHUNK);
            overlap = overlap.min(chunk_size - 1);
        }
        NormalizedOptions {
            by_header: self.by_header,
            chunk_size,
            overlap,
            timestamp: self.timestamp,
        }
    }
}

/// Options after [`ParseOptions::normalized`]; always safe to split with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedOptions {
    pub by_header: bool,
    pub chunk_size: usize,
    pub overlap: usize,
    pub timestamp: bool,
}
