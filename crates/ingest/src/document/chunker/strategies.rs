//! Chunking strategies: heading-based and fixed-size windows.

use once_cell::sync::Lazy;
use recipe_core::NormalizedOptions;
use regex::Regex;

use super::helpers::first_line;
use super::types::Segment;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+.*$").expect("heading pattern is valid"));

/// Split cleaned text with the strategy selected by `opts`.
pub fn split(text: &str, opts: &NormalizedOptions) -> Vec<Segment> {
    if opts.by_header {
        split_by_headers(text)
    } else {
        split_by_size(text, opts.chunk_size, opts.overlap)
    }
}

// ── Heading strategy ────────────────────────────────────────────────────────

/// One segment per heading, running to the next heading or the end.
///
/// Without any heading the whole text is a single segment with an empty
/// header. Text before the first heading is not part of any segment.
pub fn split_by_headers(text: &str) -> Vec<Segment> {
    let starts: Vec<usize> = HEADING.find_iter(text).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![Segment {
            header: String::new(),
            text: text.to_string(),
        }];
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let section = text[start..end].trim();
            let header = first_line(section);
            Segment {
                header: header.trim().to_string(),
                text: section[header.len()..].trim().to_string(),
            }
        })
        .collect()
}

// ── Size strategy ───────────────────────────────────────────────────────────

/// Sliding windows of `size` characters sharing `overlap` characters.
///
/// Windows are cut on `char` boundaries, never inside a UTF-8 sequence. The
/// last window ends at the end of the text and may be shorter. Each step
/// advances at least one character even when `overlap >= size`.
pub fn split_by_size(text: &str, size: usize, overlap: usize) -> Vec<Segment> {
    let size = size.max(1);
    // Byte offset of every char, plus the end of the text.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let len = bounds.len() - 1;

    let mut out = Vec::with_capacity(len / size + 1);
    let mut start = 0;
    while start < len {
        let end = start.saturating_add(size).min(len);
        out.push(Segment {
            header: format!("# chunk {}", out.len()),
            text: text[bounds[start]..bounds[end]].trim().to_string(),
        });
        if end == len {
            break;
        }
        start = end.saturating_sub(overlap).max(start + 1);
    }
    out
}
