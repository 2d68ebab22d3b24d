//! Health check and server info endpoints.

use std::collections::BTreeMap;

use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use super::fallback::not_found;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Current time, RFC 3339 UTC.
    pub timestamp: String,
}

/// Server info returned from `/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    pub message: String,
    pub status: String,
    /// Route → description.
    pub endpoints: BTreeMap<String, String>,
}

/// Simple health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}

/// Describe the server and its endpoints.
pub async fn info() -> Json<InfoResponse> {
    let endpoints = [
        ("GET /", "This info"),
        ("POST /oauth/token", "Exchange OAuth code for token"),
        ("GET /api/reddit/*", "Proxy Reddit API calls"),
    ]
    .into_iter()
    .map(|(route, desc)| (route.to_string(), desc.to_string()))
    .collect();

    Json(InfoResponse {
        message: "Reddit OAuth Backend Server".to_string(),
        status: "running".to_string(),
        endpoints,
    })
}

/// Create health and info routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(info).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = Router::new().route("/health", get(health));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(health.status, "ok");
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
        assert!(health.timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_info_endpoint() {
        let app = Router::new().route("/", get(info));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let info: InfoResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(info.status, "running");
        assert_eq!(info.endpoints.len(), 3);
        assert!(info.endpoints.contains_key("POST /oauth/token"));
        assert!(info.endpoints.contains_key("GET /api/reddit/*"));
    }
}
