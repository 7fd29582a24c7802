use std::path::Path;

use recipe_core::{RecipeError, Result};

/// Read a Markdown file as text.
///
/// Invalid UTF-8 is decoded lossily rather than rejected.
pub fn read_markdown(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| RecipeError::io(format!("parse: read {}", path.display()), e))?;

    Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    }))
}
