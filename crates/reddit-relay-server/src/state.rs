//! Application state shared across handlers.

use std::sync::Arc;

use reddit_relay_oauth::{Passthrough, ProviderCredentials};
use reqwest::Client;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Everything in here is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,

    /// Reddit app credentials and endpoints.
    pub credentials: Arc<ProviderCredentials>,

    /// Outbound HTTP client, shared with `passthrough`.
    pub http: Client,

    /// API passthrough client.
    pub passthrough: Passthrough,
}

impl AppState {
    /// Create a new application state.
    pub fn new(credentials: ProviderCredentials, config: ServerConfig) -> Self {
        let credentials = Arc::new(credentials);
        let http = Client::new();

        Self {
            config: Arc::new(config),
            passthrough: Passthrough::new(http.clone(), credentials.clone()),
            credentials,
            http,
        }
    }
}
