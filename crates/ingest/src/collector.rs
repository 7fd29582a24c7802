//! Recursive discovery of Markdown files.

use std::io;
use std::path::{Path, PathBuf};

use recipe_core::{RecipeError, Result};
use tracing::debug;
use walkdir::WalkDir;

/// True when the file name ends in `.md`, ignoring case.
pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(".md"))
        .unwrap_or(false)
}

/// Every Markdown file below `root`.
///
/// Paths keep the form of `root` (relative stays relative). Symlinks are
/// listed but not followed. Any walk failure aborts the whole call.
pub fn collect(root: &Path) -> Result<Vec<PathBuf>> {
    if root.as_os_str().is_empty() {
        return Err(RecipeError::invalid_input("collect: root is empty"));
    }
    let meta = match std::fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RecipeError::invalid_input(format!(
                "collect: root does not exist: {}",
                root.display()
            )));
        }
        Err(e) => {
            return Err(RecipeError::io(
                format!("collect: stat root {}", root.display()),
                e,
            ));
        }
    };
    if !meta.is_dir() {
        return Err(RecipeError::invalid_input(format!(
            "collect: root not directory: {}",
            root.display()
        )));
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let context = match e.path() {
                Some(p) => format!("collect: walk {}", p.display()),
                None => format!("collect: walk {}", root.display()),
            };
            RecipeError::io(context, io::Error::from(e))
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if is_markdown(entry.path()) {
            out.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), files = out.len(), "collected markdown files");
    Ok(out)
}
