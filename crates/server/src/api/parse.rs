//! On-demand parsing of the configured recipe directory.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use recipe_core::{Chunk, ParseOptions};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{api_error, run_blocking, ApiError};
use crate::state::AppState;

/// Per-request overrides of the configured parse options.
#[derive(Debug, Default, Deserialize)]
pub struct ParseRequest {
    pub by_header: Option<bool>,
    pub chunk_size: Option<i64>,
    pub overlap: Option<i64>,
    pub timestamp: Option<bool>,
}

impl ParseRequest {
    pub fn apply(&self, base: ParseOptions) -> ParseOptions {
        ParseOptions {
            by_header: self.by_header.unwrap_or(base.by_header),
            chunk_size: self.chunk_size.unwrap_or(base.chunk_size),
            overlap: self.overlap.unwrap_or(base.overlap),
            timestamp: self.timestamp.unwrap_or(base.timestamp),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub count: usize,
    pub chunks: Vec<Chunk>,
}

/// The body is optional; an empty body parses with the configured options.
pub async fn parse(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ParseResponse>, ApiError> {
    let request: ParseRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ParseRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            api_error(StatusCode::BAD_REQUEST, format!("invalid parse request: {e}"))
        })?
    };

    let opts = request.apply(state.config.parse.options());
    let dir = state.config.parse.dir.clone();
    let parser = Arc::clone(&state.parser);
    let chunks = run_blocking(move || parser.parse_dir(&dir, &opts)).await?;

    info!(chunks = chunks.len(), "served parse request");
    Ok(Json(ParseResponse {
        count: chunks.len(),
        chunks,
    }))
}
