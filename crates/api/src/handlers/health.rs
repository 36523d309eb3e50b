//! Health check handler.

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET /health
///
/// Liveness probe. Reports the running version so deploys are easy to
/// verify from the outside.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
