//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    storage: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, active storage backend, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: state.store.backend_name().to_string(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::Store;

    #[tokio::test]
    async fn health_reports_backend() {
        let app = routes().with_state(AppState::new(Store::memory()));
        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("request build failed");
        };
        let Ok(response) = app.oneshot(request).await else {
            panic!("router failed");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_default();
        assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("healthy"));
        assert_eq!(json.get("storage").and_then(|v| v.as_str()), Some("memory"));
    }
}
