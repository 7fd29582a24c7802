//! Small text and provenance helpers used by the strategies and the parser.

use chrono::{SecondsFormat, Utc};

/// Text up to the first line feed, or all of it.
pub(crate) fn first_line(text: &str) -> &str {
    match text.find('\n') {
        Some(i) => &text[..i],
        None => text,
    }
}

/// The `source` field: `rel`, or `rel|<now, RFC3339 UTC>` when `timestamp`
/// is set. The clock is read on every call.
pub fn source_label(rel: &str, timestamp: bool) -> String {
    if timestamp {
        format!(
            "{}|{}",
            rel,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    } else {
        rel.to_string()
    }
}
