//! Chunker output type.

/// One piece of a document before ids and provenance are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Heading line, `# chunk <n>` for size windows, or empty.
    pub header: String,
    /// Trimmed body text.
    pub text: String,
}
