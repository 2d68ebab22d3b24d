//! Reddit API passthrough endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Everything after this prefix is forwarded to the API host.
pub const PROXY_PREFIX: &str = "/api/reddit/";

/// GET /api/reddit/{*path}
///
/// Forwards the call with the caller's `Authorization` header. Upstream
/// errors are relayed with their original status and body.
pub async fn reddit_proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response> {
    let authorization = headers
        .get(AUTHORIZATION)
        .filter(|v| !v.is_empty())
        .ok_or(ServerError::MissingAuthorization)?;

    // Raw (still percent-encoded) path so it reaches Reddit untouched.
    let path = uri.path().strip_prefix(PROXY_PREFIX).unwrap_or_default();

    info!(
        url = %state.passthrough.upstream_url(path, uri.query()),
        "Proxying Reddit API call"
    );

    let upstream = state
        .passthrough
        .forward_get(path, uri.query(), authorization)
        .await
        .map_err(ServerError::from_proxy)?;

    if !upstream.is_success() {
        error!(status = upstream.status, body = %upstream.body, "Reddit API error");
        let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
        return Ok((status, Json(upstream.body)).into_response());
    }

    Ok(Json(upstream.body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use reddit_relay_oauth::ProviderCredentials;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn test_app() -> Router {
        let creds = ProviderCredentials::new("id", "secret")
            .unwrap()
            .with_api_base_url("http://127.0.0.1:1");
        let state = AppState::new(creds, ServerConfig::default());

        Router::new()
            .route("/api/reddit/{*path}", get(reddit_proxy_handler))
            .with_state(state)
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_missing_authorization() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/reddit/user/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Authorization header required");
    }

    #[tokio::test]
    async fn test_empty_authorization_is_missing() {
        let (status, _) = send(
            Request::builder()
                .uri("/api/reddit/user/me")
                .header("authorization", "")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_proxy_error() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/reddit/user/me")
                .header("authorization", "Bearer xyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Proxy error");
        assert!(body["message"].is_string());
    }
}
