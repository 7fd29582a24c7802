use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recipe_core::config::ParseConfig;

/// Recipe knowledge base tooling.
///
/// Collects Markdown recipes, splits them into chunks and writes them as
/// JSON Lines, or serves the same over HTTP.
#[derive(Parser, Debug)]
#[command(name = "recipe-agent", version, about = "Markdown recipe collector and chunker")]
pub struct CliArgs {
    /// YAML config file (default: configs/config.yaml)
    #[arg(long, global = true, env = "RECIPE_AGENT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse every Markdown file under a directory into JSONL chunks
    Parse(ParseArgs),

    /// Print the Markdown files that `parse` would read
    Collect {
        /// Recipe directory (defaults to parse.dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Start the HTTP service
    Serve {
        /// Listen port (defaults to server.port)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Flags left unset fall back to the `parse` section of the config.
#[derive(Args, Debug, Default)]
pub struct ParseArgs {
    /// Recipe directory
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Output JSONL file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Window size in characters (size mode)
    #[arg(long = "chunk", allow_hyphen_values = true)]
    pub chunk_size: Option<i64>,

    /// Characters shared by consecutive windows (size mode)
    #[arg(long, allow_hyphen_values = true)]
    pub overlap: Option<i64>,

    /// Split at headings (true) or into fixed-size windows (false)
    #[arg(long)]
    pub by_header: Option<bool>,

    /// Append a generation timestamp to each chunk's source
    #[arg(long)]
    pub timestamp: Option<bool>,
}

impl ParseArgs {
    pub fn apply(&self, settings: &mut ParseConfig) {
        if let Some(dir) = &self.dir {
            settings.dir = dir.clone();
        }
        if let Some(out) = &self.out {
            settings.out = out.clone();
        }
        if let Some(n) = self.chunk_size {
            settings.chunk_size = n;
        }
        if let Some(n) = self.overlap {
            settings.overlap = n;
        }
        if let Some(b) = self.by_header {
            settings.by_header = b;
        }
        if let Some(b) = self.timestamp {
            settings.timestamp = b;
        }
    }
}
