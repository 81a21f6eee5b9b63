use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - plain text greeting
pub async fn root() -> &'static str {
    "Hello World!"
}

/// GET /health - liveness plus a store ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Service is healthy",
                "data": {
                    "status": "ok",
                    "store": "ok",
                    "timestamp": now
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "Document store unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

/// Unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

/// Known paths hit with a method they do not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{} is not supported on {}", method, uri.path()))
}
