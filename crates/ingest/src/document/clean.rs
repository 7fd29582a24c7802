//! Lexical clean-up applied to every document before splitting.
//!
//! These are ordered text substitutions, not a Markdown parser: a `<...>`
//! inside a code span is removed like any other tag.

use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("image pattern is valid"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank pattern is valid"));

/// Strip images and tags, normalise line endings, trim every line and
/// collapse runs of blank lines to a single one.
pub fn clean_markdown(raw: &str) -> String {
    let text = strip_markup(raw);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    // Lines are trimmed before collapsing so whitespace-only lines count as blank.
    let lines: Vec<&str> = text.trim().split('\n').map(str::trim).collect();
    BLANK_RUN.replace_all(&lines.join("\n"), "\n\n").into_owned()
}

/// Remove images, then tags, until neither pattern matches. Removing one
/// can join its neighbours into another (`![a]<b>(u)` becomes `![a](u)`).
fn strip_markup(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let stripped = {
            let images_gone = IMAGE.replace_all(&text, "");
            HTML_TAG.replace_all(&images_gone, "").into_owned()
        };
        if stripped == text {
            return text;
        }
        text = stripped;
    }
}
