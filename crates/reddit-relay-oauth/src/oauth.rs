//! Authorization-code exchange against Reddit's token endpoint.

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};

use crate::error::{OAuthError, Result};

/// Reddit token endpoint.
pub const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Host serving the authenticated Reddit API.
pub const REDDIT_API_URL: &str = "https://oauth.reddit.com";

/// Default redirect URI (the frontend dev server).
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000";

/// Reddit rejects requests without a descriptive User-Agent.
pub const DEFAULT_USER_AGENT: &str = "RedditClient/1.0";

/// Credentials and endpoints for the Reddit app.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub user_agent: String,
    pub token_url: String,
    pub api_base_url: String,
}

impl ProviderCredentials {
    /// Create credentials with Reddit's production endpoints.
    ///
    /// Fails if either the client id or the secret is empty.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.trim().is_empty() {
            return Err(OAuthError::Config("client id is required".to_string()));
        }
        if client_secret.trim().is_empty() {
            return Err(OAuthError::Config("client secret is required".to_string()));
        }

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token_url: REDDIT_TOKEN_URL.to_string(),
            api_base_url: REDDIT_API_URL.to_string(),
        })
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the token endpoint (mock servers in tests).
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Override the API host (mock servers in tests).
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// `Basic base64(client_id:client_secret)`.
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("user_agent", &self.user_agent)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Tokens handed back to the caller after a successful exchange.
///
/// Anything else Reddit includes in the response is dropped on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenExchangeResult {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub scope: String,
}

/// Exchange an authorization code for tokens.
///
/// `redirect_uri` falls back to the configured one when absent or empty.
/// Makes exactly one request; nothing is retried.
pub async fn exchange_code_for_tokens(
    client: &Client,
    credentials: &ProviderCredentials,
    code: &str,
    redirect_uri: Option<&str>,
) -> Result<TokenExchangeResult> {
    let redirect_uri = redirect_uri
        .filter(|uri| !uri.is_empty())
        .unwrap_or(credentials.redirect_uri.as_str());

    let form = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
    ];

    tracing::debug!(url = %credentials.token_url, redirect_uri, "Exchanging authorization code");

    let response = client
        .post(&credentials.token_url)
        .header(header::AUTHORIZATION, credentials.basic_auth_header())
        .header(header::USER_AGENT, &credentials.user_agent)
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(OAuthError::Backend {
            status: status.as_u16(),
            body: parse_body_lossy(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| OAuthError::Decode(format!("Failed to parse token response: {}", e)))
}

/// Parse an error body as JSON, falling back to a JSON string of the raw text.
pub(crate) fn parse_body_lossy(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}
