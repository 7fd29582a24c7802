//! Question answering endpoint. Retrieval is not wired up, so this always
//! answers 501.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: Option<String>,
    pub sources: Vec<String>,
    pub error: &'static str,
}

pub async fn query() -> (StatusCode, Json<QueryResponse>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(QueryResponse {
            answer: None,
            sources: Vec::new(),
            error: "query answering is not available",
        }),
    )
}
