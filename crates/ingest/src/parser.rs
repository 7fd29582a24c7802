//! Markdown parser: collect, clean, split and stamp chunks for a batch of files.

use std::path::{Path, PathBuf};

use recipe_core::{Chunk, ParseOptions, RecipeError, Result};
use tracing::{debug, info};

use crate::collector;
use crate::document::chunker::{self, source_label};
use crate::document::{clean_markdown, read_markdown, DocumentPath};
use crate::traits::DocumentParser;

/// Document and chunk ordinals for one parse call.
///
/// Owned by a single call, so concurrent batches never share counters.
#[derive(Debug, Default)]
struct BatchContext {
    docs: usize,
    chunks: usize,
}

impl BatchContext {
    fn next_doc_id(&mut self) -> String {
        let id = format!("doc-{}", self.docs);
        self.docs += 1;
        id
    }

    fn next_chunk_id(&mut self) -> String {
        let id = format!("chunk-{}", self.chunks);
        self.chunks += 1;
        id
    }
}

/// Parses Markdown files into chunks, either per heading or per
/// fixed-size window. Stateless; every call starts fresh counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for MarkdownParser {
    fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        collector::collect(root)
    }

    fn parse_files_under(
        &self,
        root: &Path,
        paths: &[PathBuf],
        opts: &ParseOptions,
    ) -> Result<Vec<Chunk>> {
        if paths.is_empty() {
            return Err(RecipeError::invalid_input("parse: no input files"));
        }
        let opts = opts.normalized();
        let mut ctx = BatchContext::default();
        let mut chunks = Vec::with_capacity(paths.len() * 4);

        for path in paths {
            let raw = read_markdown(path)?;
            let doc = DocumentPath::derive(root, path);
            let doc_id = ctx.next_doc_id();
            let text = clean_markdown(&raw);
            let segments = chunker::split(&text, &opts);
            debug!(
                doc_id = %doc_id,
                path = %doc.rel,
                segments = segments.len(),
                "parsed document"
            );

            for (index, segment) in segments.into_iter().enumerate() {
                chunks.push(Chunk {
                    id: ctx.next_chunk_id(),
                    doc_id: doc_id.clone(),
                    index,
                    header: segment.header,
                    text: segment.text,
                    source: source_label(&doc.rel, opts.timestamp),
                    category: doc.category.clone(),
                    name: doc.name.clone(),
                    path: doc.rel.clone(),
                });
            }
        }

        info!(
            documents = ctx.docs,
            chunks = chunks.len(),
            by_header = opts.by_header,
            "parse complete"
        );
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::ErrorKind;
    use std::collections::HashSet;
    use std::fs;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn header_opts() -> ParseOptions {
        ParseOptions {
            by_header: true,
            chunk_size: 0,
            overlap: 0,
            timestamp: false,
        }
    }

    #[test]
    fn header_mode_example() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write(tmp.path(), "a.md", "# A\nfoo\n\n## B\nbar\n\n# C\nbaz");

        let chunks = MarkdownParser::new().parse_files(&[file], &header_opts()).unwrap();
        let headers: Vec<&str> = chunks.iter().map(|c| c.header.as_str()).collect();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(headers, ["# A", "## B", "# C"]);
        assert_eq!(texts, ["foo", "bar", "baz"]);
        for (i, c) in chunks.iter().enumerate() {
            assert_eq!(c.index, i);
            assert_eq!(c.id, format!("chunk-{i}"));
            assert_eq!(c.doc_id, "doc-0");
            assert_eq!(c.path, "a.md");
            assert_eq!(c.source, "a.md");
            assert_eq!(c.category, "");
            assert_eq!(c.name, "a");
        }
    }

    #[test]
    fn no_heading_yields_whole_cleaned_document() {
        let tmp = tempfile::tempdir().unwrap();
        let raw = "  Plain <b>notes</b>\r\n\r\n\r\n\r\nwith ![pic](p.png) lines  ";
        let file = write(tmp.path(), "plain.md", raw);

        let chunks = MarkdownParser::new().parse_files(&[file], &header_opts()).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].header, "");
        assert_eq!(chunks[0].text, clean_markdown(raw));
        assert_eq!(chunks[0].text, "Plain notes\n\nwith  lines");
    }

    #[test]
    fn ids_are_unique_and_indices_contiguous_across_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write(tmp.path(), "soups/a.md", "# One\nx\n# Two\ny");
        let b = write(tmp.path(), "soups/b.md", "no headings here");
        let c = write(tmp.path(), "mains/c.md", "# Only\nz");

        let chunks = MarkdownParser::new()
            .parse_files_under(tmp.path(), &[a, b, c], &header_opts())
            .unwrap();
        assert_eq!(chunks.len(), 4);

        let ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["chunk-0", "chunk-1", "chunk-2", "chunk-3"]);
        let docs: Vec<&str> = chunks.iter().map(|c| c.doc_id.as_str()).collect();
        assert_eq!(docs, ["doc-0", "doc-0", "doc-1", "doc-2"]);
        let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
        assert_eq!(indices, [0, 1, 0, 0]);

        assert_eq!(chunks[2].category, "soups");
        assert_eq!(chunks[2].name, "b");
        assert_eq!(chunks[3].category, "mains");
        assert_eq!(chunks[3].name, "c");
    }

    #[test]
    fn doc_counter_advances_for_empty_size_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let empty = write(tmp.path(), "empty.md", "   \n\n");
        let full = write(tmp.path(), "full.md", "some text");
        let opts = ParseOptions {
            by_header: false,
            ..header_opts()
        };

        let chunks = MarkdownParser::new().parse_files(&[empty, full], &opts).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].doc_id, "doc-1");
        assert_eq!(chunks[0].id, "chunk-0");
    }

    #[test]
    fn size_mode_floors_small_chunk_size() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write(tmp.path(), "long.md", &"z".repeat(450));
        let opts = ParseOptions {
            by_header: false,
            chunk_size: 50,
            overlap: 10,
            timestamp: false,
        };

        let chunks = MarkdownParser::new().parse_files(&[file], &opts).unwrap();
        // 200-char windows advancing by 190: [0,200) [190,390) [380,450)
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.chars().count(), 200);
        assert_eq!(chunks[2].text.chars().count(), 70);
        let headers: Vec<&str> = chunks.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, ["# chunk 0", "# chunk 1", "# chunk 2"]);
    }

    #[test]
    fn timestamp_suffix_is_rfc3339() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write(tmp.path(), "soups/tomato.md", "# Tomato\nred");
        let opts = ParseOptions {
            timestamp: true,
            ..header_opts()
        };

        let chunks = MarkdownParser::new()
            .parse_files_under(tmp.path(), &[file], &opts)
            .unwrap();
        let chunk = &chunks[0];
        let (rel, ts) = chunk.source.split_once('|').unwrap();
        assert_eq!(rel, chunk.path);
        assert_eq!(chunk.source_path(), "soups/tomato.md");
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn files_outside_first_parent_keep_original_path() {
        let tmp = tempfile::tempdir().unwrap();
        let first = write(tmp.path(), "soups/a.md", "# A\nx");
        let other = write(tmp.path(), "mains/b.md", "# B\ny");

        let chunks = MarkdownParser::new()
            .parse_files(&[first, other.clone()], &header_opts())
            .unwrap();
        assert_eq!(chunks[0].path, "a.md");
        assert_eq!(chunks[1].path, other.to_string_lossy());
    }

    #[test]
    fn explicit_root_relativises_every_file() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "soups/a.md", "# A\nx");
        write(tmp.path(), "mains/b.md", "# B\ny");

        let chunks = MarkdownParser::new()
            .parse_dir(tmp.path(), &header_opts())
            .unwrap();
        let mut paths: Vec<String> = chunks.iter().map(|c| c.path.replace('\\', "/")).collect();
        paths.sort();
        assert_eq!(paths, ["mains/b.md", "soups/a.md"]);
    }

    #[test]
    fn empty_path_list_is_invalid_input() {
        let parser = MarkdownParser::new();
        let err = parser.parse_files(&[], &header_opts()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = parser
            .parse_files_under(Path::new("."), &[], &header_opts())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn unreadable_file_fails_whole_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let good = write(tmp.path(), "good.md", "# G\nfine");
        let missing = tmp.path().join("missing.md");

        let err = MarkdownParser::new()
            .parse_files(&[good, missing], &header_opts())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("missing.md"));
    }

    #[test]
    fn counters_restart_per_call() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write(tmp.path(), "a.md", "# A\nx\n# B\ny");
        let parser = MarkdownParser::new();

        let first = parser.parse_files(&[file.clone()], &header_opts()).unwrap();
        let second = parser.parse_files(&[file], &header_opts()).unwrap();
        assert_eq!(first, second);

        let ids: HashSet<&str> = first.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), first.len());
    }
}
