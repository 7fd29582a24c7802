//! Recipe listing.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use recipe_ingest::document::DocumentPath;
use serde::Serialize;

use super::{run_blocking, ApiError};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeEntry {
    pub name: String,
    pub category: String,
    pub path: String,
}

/// Every Markdown file under the configured recipe directory, sorted by
/// path. A missing directory lists as empty.
pub async fn list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecipeEntry>>, ApiError> {
    let dir = state.config.parse.dir.clone();
    let parser = Arc::clone(&state.parser);

    let entries = run_blocking(move || {
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "recipe dir missing; listing nothing");
            return Ok(Vec::new());
        }
        let mut entries: Vec<RecipeEntry> = parser
            .collect(&dir)?
            .iter()
            .map(|file| {
                let doc = DocumentPath::derive(&dir, file);
                RecipeEntry {
                    name: doc.name,
                    category: doc.category,
                    path: doc.rel,
                }
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    })
    .await?;

    Ok(Json(entries))
}
