//! Static resource handlers
//!
//! Read-only JSON documents exposed to calling agents: the category taxonomy
//! and the operations manifest. Reads are async so a slow disk never stalls
//! concurrent requests.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io::ErrorKind;
use std::path::Path;

use crate::state::AppState;

/// Fallback taxonomy served when the backing file is absent.
const DEFAULT_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Business",
    "Other",
];

/// GET /resources/categories - Category taxonomy
///
/// Serves the backing document verbatim, falling back to the built-in list
/// when the file does not exist.
pub async fn get_categories(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.categories_path).await {
        Ok(body) => json_document(body),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Json(json!({ "categories": DEFAULT_CATEGORIES })).into_response()
        }
        Err(e) => read_failure(&state.categories_path, &e),
    }
}

/// GET /resources/operations - Operations manifest; no fallback.
pub async fn get_operations(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.operations_path).await {
        Ok(body) => json_document(body),
        Err(e) => read_failure(&state.operations_path, &e),
    }
}

/// Serve an already-serialized JSON document verbatim.
fn json_document(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

fn read_failure(path: &Path, err: &std::io::Error) -> Response {
    tracing::error!(path = %path.display(), error = %err, "Failed to read resource document");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}
