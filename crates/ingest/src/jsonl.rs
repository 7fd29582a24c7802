//! JSON Lines output: one chunk object per line.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use recipe_core::{Chunk, RecipeError, Result};

/// Write each chunk as compact JSON followed by `\n`.
///
/// Every line is encoded in full before it reaches `writer`, so an error
/// leaves the previously written lines intact. Returns the number of lines.
pub fn write_jsonl<W: Write>(writer: &mut W, chunks: &[Chunk]) -> Result<usize> {
    let mut line = Vec::with_capacity(512);
    for (written, chunk) in chunks.iter().enumerate() {
        line.clear();
        serde_json::to_writer(&mut line, chunk)?;
        line.push(b'\n');
        writer.write_all(&line).map_err(|e| {
            RecipeError::io(format!("jsonl: write record {} ({})", written, chunk.id), e)
        })?;
    }
    Ok(chunks.len())
}

/// Create (or truncate) `path`, making missing parent directories, and
/// write `chunks` to it.
pub fn write_jsonl_file(path: &Path, chunks: &[Chunk]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            RecipeError::io(format!("jsonl: create out dir {}", parent.display()), e)
        })?;
    }
    let file = File::create(path)
        .map_err(|e| RecipeError::io(format!("jsonl: create {}", path.display()), e))?;

    let mut writer = BufWriter::new(file);
    let count = write_jsonl(&mut writer, chunks)?;
    writer
        .flush()
        .map_err(|e| RecipeError::io(format!("jsonl: flush {}", path.display()), e))?;
    tracing::info!(path = %path.display(), records = count, "wrote jsonl");
    Ok(count)
}
