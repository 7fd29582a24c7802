//! Subcommand implementations.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use recipe_core::Config;
use recipe_ingest::{jsonl, DocumentParser, MarkdownParser};
use tracing::info;

use crate::cli::ParseArgs;

#[derive(Debug, PartialEq, Eq)]
pub struct ParseSummary {
    pub files: usize,
    pub chunks: usize,
    pub out: PathBuf,
}

/// Collect, chunk and write the configured recipe directory as JSONL.
pub fn parse(config: &Config, args: &ParseArgs) -> Result<ParseSummary> {
    let mut settings = config.parse.clone();
    args.apply(&mut settings);

    let parser = MarkdownParser::new();
    let files = parser
        .collect(&settings.dir)
        .with_context(|| format!("failed to collect recipes in {}", settings.dir.display()))?;
    if files.is_empty() {
        bail!("no markdown files found under {}", settings.dir.display());
    }
    info!("Found {} markdown files in {}", files.len(), settings.dir.display());

    let chunks = parser
        .parse_files_under(&settings.dir, &files, &settings.options())
        .context("failed to parse recipes")?;
    let written = jsonl::write_jsonl_file(&settings.out, &chunks)
        .with_context(|| format!("failed to write {}", settings.out.display()))?;

    info!(
        "Parsed {} files into {} chunks -> {}",
        files.len(),
        written,
        settings.out.display()
    );
    Ok(ParseSummary {
        files: files.len(),
        chunks: written,
        out: settings.out,
    })
}

/// Print every collected path, one per line. Returns how many were printed.
pub fn collect<W: Write>(config: &Config, dir: Option<&Path>, out: &mut W) -> Result<usize> {
    let dir = dir.unwrap_or(&config.parse.dir);
    let files = MarkdownParser::new()
        .collect(dir)
        .with_context(|| format!("failed to collect recipes in {}", dir.display()))?;
    for file in &files {
        writeln!(out, "{}", file.display()).context("failed to write listing")?;
    }
    Ok(files.len())
}

pub async fn serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    recipe_server::serve(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::Chunk;
    use std::fs;

    fn config_for(dir: &Path, out: &Path) -> Config {
        let mut config = Config::default();
        config.parse.dir = dir.to_path_buf();
        config.parse.out = out.to_path_buf();
        config.parse.timestamp = false;
        config
    }

    #[test]
    fn parse_writes_jsonl() {
        let tmp = tempfile::tempdir().unwrap();
        let recipes = tmp.path().join("recipes");
        fs::create_dir_all(recipes.join("soups")).unwrap();
        fs::write(recipes.join("soups/tomato.md"), "# Tomato\nred\n## Steps\nsimmer").unwrap();
        fs::write(recipes.join("bread.md"), "# Bread\nflour").unwrap();
        let out = tmp.path().join("out/chunks.jsonl");

        let summary = parse(&config_for(&recipes, &out), &ParseArgs::default()).unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.chunks, 3);

        let content = fs::read_to_string(&out).unwrap();
        let chunks: Vec<Chunk> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].path, "bread.md");
        assert_eq!(chunks[1].category, "soups");
    }

    #[test]
    fn flags_override_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("long.md"), "x".repeat(500)).unwrap();
        let out = tmp.path().join("a.jsonl");
        let other_out = tmp.path().join("b.jsonl");

        let args = ParseArgs {
            out: Some(other_out.clone()),
            by_header: Some(false),
            chunk_size: Some(200),
            overlap: Some(0),
            ..ParseArgs::default()
        };
        let summary = parse(&config_for(tmp.path(), &out), &args).unwrap();
        assert_eq!(summary.chunks, 3);
        assert_eq!(summary.out, other_out);
        assert!(other_out.exists());
        assert!(!out.exists());
    }

    #[test]
    fn parse_without_markdown_fails() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("notes.txt"), "nothing").unwrap();
        let out = tmp.path().join("chunks.jsonl");

        let err = parse(&config_for(tmp.path(), &out), &ParseArgs::default()).unwrap_err();
        assert!(err.to_string().contains("no markdown files"));
        assert!(!out.exists());
    }

    #[test]
    fn parse_of_missing_dir_reports_context() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        let err = parse(&config_for(&missing, &tmp.path().join("o.jsonl")), &ParseArgs::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to collect recipes"));
    }

    #[test]
    fn collect_prints_one_path_per_line() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.md"), "# A").unwrap();
        fs::write(tmp.path().join("b.MD"), "# B").unwrap();
        fs::write(tmp.path().join("c.txt"), "c").unwrap();

        let config = config_for(Path::new("unused"), Path::new("unused.jsonl"));
        let mut out = Vec::new();
        let n = collect(&config, Some(tmp.path()), &mut out).unwrap();
        assert_eq!(n, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("a.md"));
        assert!(lines[1].ends_with("b.MD"));
    }
}
