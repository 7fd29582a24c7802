use std::sync::Arc;

use recipe_core::Config;
use recipe_ingest::{DocumentParser, MarkdownParser};

/// Shared state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub parser: Arc<dyn DocumentParser>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_parser(config, Arc::new(MarkdownParser::new()))
    }

    pub fn with_parser(config: Config, parser: Arc<dyn DocumentParser>) -> Self {
        Self { config, parser }
    }
}
