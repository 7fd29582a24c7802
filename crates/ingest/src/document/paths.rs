//! Relative path, category and name derivation for chunk provenance.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Provenance fields shared by every chunk of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPath {
    /// Path relative to the batch root, or the original path when the file
    /// is not under it.
    pub rel: String,
    pub category: String,
    pub name: String,
}

impl DocumentPath {
    pub fn derive(root: &Path, file: &Path) -> Self {
        let rel = relative_path(root, file);
        let (category, name) = category_and_name(&rel);
        Self {
            rel,
            category,
            name,
        }
    }
}

/// Root used when the caller does not name one: the first file's parent.
pub fn batch_root(first: &Path) -> PathBuf {
    match first.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `file` relative to `root`, best effort.
///
/// Both sides are made absolute lexically (no symlink resolution). If that
/// fails or `file` is not under `root`, the original path string is kept.
pub fn relative_path(root: &Path, file: &Path) -> String {
    let (Some(abs_root), Some(abs_file)) = (absolutize(root), absolutize(file)) else {
        return file.to_string_lossy().into_owned();
    };
    match abs_file.strip_prefix(&abs_root) {
        Ok(rest) => rest.to_string_lossy().into_owned(),
        Err(_) => file.to_string_lossy().into_owned(),
    }
}

/// Split `rel` on the path separator: the first segment is the category
/// (only when there are at least two), the last minus its extension is the
/// name.
pub fn category_and_name(rel: &str) -> (String, String) {
    let parts: Vec<&str> = rel.split(MAIN_SEPARATOR).collect();
    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (String::new(), strip_extension(only).to_string()),
        [first, .., last] => (first.to_string(), strip_extension(last).to_string()),
    }
}

fn strip_extension(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(dot) => &segment[..dot],
        None => segment,
    }
}

fn absolutize(path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}
