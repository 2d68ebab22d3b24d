//! Passthrough client for forwarding GET requests to the Reddit API host.
//!
//! The caller's `Authorization` header is forwarded as-is. The relay never
//! checks that the token was issued through it.

use std::sync::Arc;

use reqwest::{Client, header};

use crate::error::{OAuthError, Result};
use crate::oauth::ProviderCredentials;

/// Upstream status and JSON body, relayed to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Forwards requests to the authenticated API host.
#[derive(Debug, Clone)]
pub struct Passthrough {
    client: Client,
    credentials: Arc<ProviderCredentials>,
}

impl Passthrough {
    pub fn new(client: Client, credentials: Arc<ProviderCredentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Build the upstream URL for a proxied path and optional query string.
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> String {
        let base = self.credentials.api_base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}/{}?{}", base, path, query),
            None => format!("{}/{}", base, path),
        }
    }

    /// Forward a GET request.
    ///
    /// Non-success statuses are not errors here; they come back in the
    /// [`ProxyResponse`] so the caller can relay them. Only transport failures
    /// and non-JSON bodies produce an `Err`.
    pub async fn forward_get(
        &self,
        path: &str,
        query: Option<&str>,
        authorization: &header::HeaderValue,
    ) -> Result<ProxyResponse> {
        let url = self.upstream_url(path, query);
        tracing::debug!(url = %url, "Forwarding Reddit API call");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, authorization.clone())
            .header(header::USER_AGENT, &self.credentials.user_agent)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        let body: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            OAuthError::Decode(format!(
                "Failed to parse Reddit response ({}): {}",
                status, e
            ))
        })?;

        Ok(ProxyResponse { status, body })
    }
}
