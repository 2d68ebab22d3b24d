//! HTTP relay for Reddit OAuth.
//!
//! Exchanges authorization codes for tokens server-side (so the client secret
//! never reaches the browser) and proxies authenticated GET calls to the
//! Reddit API to get around CORS.
//!
//! # Routes
//!
//! - `GET /` - server info
//! - `GET /health` - liveness
//! - `POST /oauth/token` - code exchange
//! - `GET /api/reddit/{*path}` - API passthrough
//!
//! Anything else is served from the static directory when one is configured,
//! or answered with a JSON 404.
//!
//! # Example
//!
//! ```ignore
//! use reddit_relay_oauth::ProviderCredentials;
//! use reddit_relay_server::{Server, ServerConfig};
//!
//! let credentials = ProviderCredentials::new(client_id, client_secret)?;
//! let config = ServerConfig::new().with_bind_address("127.0.0.1:3001".parse()?);
//!
//! Server::new(credentials, config).run().await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorResponse, Result, ServerError};
pub use state::AppState;

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use reddit_relay_oauth::ProviderCredentials;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// The relay HTTP server.
pub struct Server {
    /// Application state.
    state: AppState,
}

impl Server {
    /// Create a new server from credentials and configuration.
    pub fn new(credentials: ProviderCredentials, config: ServerConfig) -> Self {
        Self {
            state: AppState::new(credentials, config),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let router = Router::new()
            .merge(routes::health_routes())
            .route(
                "/oauth/token",
                post(routes::token_handler).fallback(routes::not_found),
            )
            .route(
                "/api/reddit/",
                get(routes::reddit_proxy_handler).fallback(routes::not_found),
            )
            .route(
                "/api/reddit/{*path}",
                get(routes::reddit_proxy_handler).fallback(routes::not_found),
            );

        let router = match &self.state.config.static_dir {
            Some(dir) => router.fallback_service(
                ServeDir::new(dir)
                    .call_fallback_on_method_not_allowed(true)
                    .fallback(routes::not_found.into_service()),
            ),
            None => router.fallback(routes::not_found),
        };

        let router = router
            // Panics become JSON 500s (innermost, so logging sees the status)
            .layer(CatchPanicLayer::custom(middleware::handle_panic))
            .layer(axum::middleware::from_fn_with_state(
                self.state.clone(),
                middleware::request_logging_middleware,
            ));

        let router = match cors_layer(&self.state.config.cors_origins) {
            Some(cors) => router.layer(cors),
            None => router,
        };

        router
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        self.run_on(addr).await
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        self.run_with_shutdown(addr, std::future::pending()).await
    }

    /// Run until `shutdown` resolves, letting in-flight requests finish.
    pub async fn run_with_shutdown(
        self,
        addr: SocketAddr,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Internal(format!("Failed to bind: {}", e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::Internal(format!("Failed to read local address: {}", e)))?;

        info!(addr = %local_addr, "Starting Reddit OAuth relay");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> SocketAddr {
        self.state.config.bind_address
    }
}

/// Build the CORS layer, or `None` when no origins are configured.
///
/// `*` allows any origin without credentials; explicit origins allow
/// credentials.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
            ])
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}
