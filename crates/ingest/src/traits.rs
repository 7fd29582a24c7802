use std::path::{Path, PathBuf};

use recipe_core::{Chunk, ParseOptions, RecipeError, Result};

use crate::document::batch_root;

/// Turns a directory of documents into chunks.
///
/// The HTTP and CLI layers only talk to this trait, so a parser for another
/// document format can be swapped in without touching them.
pub trait DocumentParser: Send + Sync {
    /// All parseable files under `root`, in no guaranteed order.
    fn collect(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Parse `paths` in order, deriving each chunk's `path` relative to
    /// `root`. Either every file parses or the whole call fails.
    fn parse_files_under(
        &self,
        root: &Path,
        paths: &[PathBuf],
        opts: &ParseOptions,
    ) -> Result<Vec<Chunk>>;

    /// Parse `paths` relative to the parent directory of the first one.
    fn parse_files(&self, paths: &[PathBuf], opts: &ParseOptions) -> Result<Vec<Chunk>> {
        let root = match paths.first() {
            Some(first) => batch_root(first),
            None => return Err(RecipeError::invalid_input("parse: no input files")),
        };
        self.parse_files_under(&root, paths, opts)
    }

    /// Collect `root` and parse everything found relative to it.
    fn parse_dir(&self, root: &Path, opts: &ParseOptions) -> Result<Vec<Chunk>> {
        let files = self.collect(root)?;
        self.parse_files_under(root, &files, opts)
    }
}
