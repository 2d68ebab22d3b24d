//! Error types for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reddit_relay_oauth::OAuthError;
use serde::Serialize;
use thiserror::Error;

/// Server error type.
///
/// Every variant renders as `{error, message?, details?}` with a fixed status.
#[derive(Debug, Error)]
pub enum ServerError {
    /// `code` absent or empty on the token endpoint.
    #[error("Authorization code is required")]
    MissingCode,

    /// Request body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Reddit rejected the authorization code.
    #[error("Token exchange failed")]
    TokenExchange { details: serde_json::Value },

    /// Transport failure while exchanging the code.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Proxy call without an `Authorization` header.
    #[error("Authorization header required")]
    MissingAuthorization,

    /// Transport or decoding failure while proxying.
    #[error("Proxy error: {0}")]
    Proxy(String),

    /// No route matched.
    #[error("Endpoint not found")]
    NotFound,

    /// Uncaught failure, including handler panics.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Map a failed code exchange.
    pub fn from_token_exchange(err: OAuthError) -> Self {
        match err {
            OAuthError::Backend { body, .. } => ServerError::TokenExchange { details: body },
            OAuthError::Network(msg) | OAuthError::Decode(msg) => {
                ServerError::UpstreamUnavailable(msg)
            }
            OAuthError::Config(msg) => ServerError::Internal(msg),
        }
    }

    /// Map a failed proxy call.
    pub fn from_proxy(err: OAuthError) -> Self {
        match err {
            OAuthError::Network(msg) | OAuthError::Decode(msg) => ServerError::Proxy(msg),
            other => ServerError::Proxy(other.to_string()),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingCode
            | ServerError::InvalidBody(_)
            | ServerError::TokenExchange { .. } => StatusCode::BAD_REQUEST,
            ServerError::MissingAuthorization => StatusCode::UNAUTHORIZED,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::UpstreamUnavailable(_)
            | ServerError::Proxy(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short, stable description of what went wrong.
    pub error: String,
    /// Underlying error text, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Provider response body for rejected exchanges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            message: None,
            details: None,
        }
    }

    fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Server error");
        } else {
            tracing::warn!(status = %status, error = %self, "Client error");
        }

        let body = match self {
            ServerError::MissingCode => ErrorResponse::new("Authorization code is required"),
            ServerError::InvalidBody(msg) => {
                ErrorResponse::new("Invalid request body").with_message(msg)
            }
            ServerError::TokenExchange { details } => ErrorResponse {
                details: Some(details),
                ..ErrorResponse::new("Token exchange failed")
            },
            ServerError::UpstreamUnavailable(msg) | ServerError::Internal(msg) => {
                ErrorResponse::new("Internal server error").with_message(msg)
            }
            ServerError::MissingAuthorization => {
                ErrorResponse::new("Authorization header required")
            }
            ServerError::Proxy(msg) => ErrorResponse::new("Proxy error").with_message(msg),
            ServerError::NotFound => ErrorResponse::new("Endpoint not found"),
        };

        (status, Json(body)).into_response()
    }
}
