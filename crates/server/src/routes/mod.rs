//! API route handlers
//!
//! - `health`: Health checks, readiness, and metrics
//! - `strings`: String creation, lookup, filtering and deletion

pub mod health;
pub mod strings;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use string_analyzer::{AnalyzerError, StringAnalyzer};

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "String Analyzer",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "String Analyzer",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /strings",
            "GET /strings",
            "GET /strings/filter-by-natural-language",
            "GET /strings/{id}",
            "DELETE /strings/{id}",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Run a store-touching operation off the async runtime.
pub(crate) async fn with_analyzer<T, F>(state: &ServerState, op: F) -> ServerResult<T>
where
    F: FnOnce(&StringAnalyzer) -> Result<T, AnalyzerError> + Send + 'static,
    T: Send + 'static,
{
    let analyzer = std::sync::Arc::clone(&state.analyzer);
    tokio::task::spawn_blocking(move || op(&analyzer))
        .await
        .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))?
        .map_err(ServerError::from)
}
