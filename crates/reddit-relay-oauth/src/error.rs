//! Error types for the Reddit client.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, OAuthError>;

/// Errors that can occur while talking to Reddit.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// Transport failure: DNS, connect, TLS, or reading the response body.
    #[error("{0}")]
    Network(String),

    /// Reddit answered with a non-success status.
    #[error("Backend error ({status}): {body}")]
    Backend {
        status: u16,
        /// Response body, parsed as JSON when possible, otherwise a JSON string.
        body: serde_json::Value,
    },

    /// Reddit answered but the body was not the JSON we expected.
    #[error("{0}")]
    Decode(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for OAuthError {
    fn from(e: reqwest::Error) -> Self {
        OAuthError::Network(e.to_string())
    }
}
