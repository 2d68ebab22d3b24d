//! Common test utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use wiremock::MockServer;

use reddit_relay_oauth::ProviderCredentials;
use reddit_relay_server::{Server, ServerConfig};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";

/// `Basic base64("test-client:test-secret")`.
pub const EXPECTED_BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

/// A relay running in the background, pointed at a mock Reddit.
pub struct TestServer {
    /// The relay's address.
    pub addr: SocketAddr,
    /// HTTP client for talking to the relay.
    pub client: Client,
    /// Mock standing in for both Reddit hosts.
    pub upstream: MockServer,
    /// Handle to the server task.
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a relay whose token endpoint and API host are a fresh mock server.
    pub async fn start() -> Result<Self> {
        let upstream = MockServer::start().await;

        let credentials = ProviderCredentials::new(CLIENT_ID, CLIENT_SECRET)?
            .with_token_url(format!("{}/api/v1/access_token", upstream.uri()))
            .with_api_base_url(upstream.uri());

        let addr = find_available_port().await?;

        let config = ServerConfig::new()
            .with_bind_address(addr)
            .with_request_logging(false);

        let server = Server::new(credentials, config);
        let handle = tokio::spawn(async move {
            let _ = server.run_on(addr).await;
        });

        let client = Client::new();
        wait_for_server(&client, addr).await?;

        Ok(Self {
            addr,
            client,
            upstream,
            _handle: handle,
        })
    }

    /// Get the base URL for the relay.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{}", self.base_url(), path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(format!("{}{}", self.base_url(), path))
    }

    /// Number of requests the mock upstream has seen.
    pub async fn upstream_calls(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

/// Find an available port for the test server.
async fn find_available_port() -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

/// Wait for the server to become ready.
async fn wait_for_server(client: &Client, addr: SocketAddr) -> Result<()> {
    let url = format!("http://{}/health", addr);

    let result = timeout(Duration::from_secs(5), async {
        loop {
            match client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => return,
                _ => tokio::time::sleep(Duration::from_millis(50)).await,
            }
        }
    })
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(_) => anyhow::bail!("Timeout waiting for server to start"),
    }
}
