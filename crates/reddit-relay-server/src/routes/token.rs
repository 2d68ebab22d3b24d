//! OAuth authorization-code exchange endpoint.

use axum::{
    Form, Json,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
};
use reddit_relay_oauth::{TokenExchangeResult, exchange_code_for_tokens};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Token exchange request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Authorization code from the Reddit redirect.
    #[serde(default)]
    pub code: Option<String>,
    /// Overrides the configured redirect URI when present.
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// Extracts a [`TokenRequest`] from a JSON or form-encoded body.
///
/// Any other content type, or an empty body, yields an empty request so the
/// handler can answer with "code is required".
pub struct TokenBody(pub TokenRequest);

impl<S> FromRequest<S> for TokenBody
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<TokenRequest>::from_request(req, state)
                .await
                .map_err(|e| ServerError::InvalidBody(e.body_text()))?;
            return Ok(Self(body));
        }

        let is_json = content_type.starts_with("application/json")
            || (content_type.starts_with("application/") && content_type.contains("+json"));
        if !is_json {
            return Ok(Self(TokenRequest::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ServerError::InvalidBody(e.body_text()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(TokenRequest::default()));
        }

        let Json(body) = Json::<TokenRequest>::from_bytes(&bytes)
            .map_err(|e| ServerError::InvalidBody(e.body_text()))?;
        Ok(Self(body))
    }
}

/// First `len` characters of `value`, for logs.
fn preview(value: &str, len: usize) -> String {
    let head: String = value.chars().take(len).collect();
    format!("{}...", head)
}

/// POST /oauth/token
///
/// Exchanges the code with Reddit and returns only `access_token`,
/// `refresh_token`, `expires_in` and `scope`.
pub async fn token_handler(
    State(state): State<AppState>,
    TokenBody(request): TokenBody,
) -> Result<Json<TokenExchangeResult>> {
    let code = request.code.as_deref().filter(|c| !c.is_empty());

    info!(
        code = %code.map(|c| preview(c, 10)).unwrap_or_default(),
        redirect_uri = ?request.redirect_uri,
        client_id = %preview(&state.credentials.client_id, 8),
        has_secret = !state.credentials.client_secret.is_empty(),
        "Token exchange request"
    );

    let code = code.ok_or(ServerError::MissingCode)?;

    let tokens = exchange_code_for_tokens(
        &state.http,
        &state.credentials,
        code,
        request.redirect_uri.as_deref(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Reddit token error");
        ServerError::from_token_exchange(e)
    })?;

    info!("Token exchange successful");
    Ok(Json(tokens))
}
