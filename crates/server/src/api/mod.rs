//! API endpoint modules.
//!
//! Shared error shape and the blocking-work helper live here in mod.rs.

mod health;
mod parse;
mod query;
mod recipes;

use axum::http::StatusCode;
use axum::Json;
use recipe_core::{ErrorKind, RecipeError};
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Caller mistakes become 400, everything else 500.
pub(crate) fn recipe_error(err: RecipeError) -> ApiError {
    let status = match err.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Io | ErrorKind::Serialize => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("request failed: {}", err);
    } else {
        tracing::debug!("rejected request: {}", err);
    }
    api_error(status, err.to_string())
}

/// Run filesystem-bound work off the async runtime.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> recipe_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(recipe_error(err)),
        Err(join) => {
            tracing::error!("blocking task failed: {}", join);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal worker failure",
            ))
        }
    }
}

// ── Re-exports ───────────────────────────────────────────────────

pub use health::{config, health, HealthResponse};
pub use parse::{parse, ParseRequest, ParseResponse};
pub use query::{query, QueryResponse};
pub use recipes::{list_recipes, RecipeEntry};
