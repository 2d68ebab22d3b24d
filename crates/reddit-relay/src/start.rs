//! Start the relay server from CLI flags and environment.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use reddit_relay_oauth::ProviderCredentials;
use reddit_relay_oauth::oauth::{DEFAULT_REDIRECT_URI, DEFAULT_USER_AGENT};
use reddit_relay_server::config::{DEFAULT_CORS_ORIGINS, DEFAULT_PORT};
use reddit_relay_server::{Server, ServerConfig};

/// Directory served as static files when `--static-dir` is not given.
const DEFAULT_STATIC_DIR: &str = "public";

/// Arguments for starting the relay.
///
/// Every flag can also be set through its environment variable.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Reddit app client id
    #[arg(long, env = "REDDIT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Reddit app client secret
    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Redirect URI registered with the Reddit app
    #[arg(long, env = "REDDIT_REDIRECT_URI", default_value = DEFAULT_REDIRECT_URI)]
    pub redirect_uri: String,

    /// User-Agent sent to Reddit (their API policy requires one)
    #[arg(long, env = "REDDIT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, env = "RELAY_BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Allowed CORS origin (repeatable, or comma-separated in the env var)
    #[arg(long = "cors-origin", env = "RELAY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Directory of static files to serve (defaults to ./public if present)
    #[arg(long, env = "RELAY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl StartArgs {
    /// Build provider credentials, failing if either secret is missing.
    pub fn credentials(&self) -> Result<ProviderCredentials> {
        let client_id = self
            .client_id
            .clone()
            .context("missing Reddit client id: set REDDIT_CLIENT_ID or pass --client-id")?;
        let client_secret = self.client_secret.clone().context(
            "missing Reddit client secret: set REDDIT_CLIENT_SECRET or pass --client-secret",
        )?;

        let credentials = ProviderCredentials::new(client_id, client_secret)?
            .with_redirect_uri(&self.redirect_uri)
            .with_user_agent(&self.user_agent);

        Ok(credentials)
    }

    /// Build the server config.
    pub fn server_config(&self) -> ServerConfig {
        let cors_origins: Vec<String> = if self.cors_origins.is_empty() {
            DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
        } else {
            self.cors_origins
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        };

        let mut config = ServerConfig::new()
            .with_bind_address(SocketAddr::new(self.bind, self.port))
            .with_cors_origins(cors_origins);

        let static_dir = self.static_dir.clone().or_else(|| {
            Path::new(DEFAULT_STATIC_DIR)
                .is_dir()
                .then(|| PathBuf::from(DEFAULT_STATIC_DIR))
        });
        if let Some(dir) = static_dir {
            config = config.with_static_dir(dir);
        }

        config
    }
}

/// Run the relay until Ctrl-C.
pub async fn run(args: StartArgs) -> Result<()> {
    let credentials = args.credentials()?;
    let config = args.server_config();

    info!("Reddit OAuth relay starting");
    info!("Server URL: http://localhost:{}", config.bind_address.port());
    info!(
        "Configure your Reddit app redirect URI to: {}",
        credentials.redirect_uri
    );
    info!("POST /oauth/token - Exchange OAuth code for token");
    info!("GET /api/reddit/* - Proxy Reddit API calls");
    if let Some(dir) = &config.static_dir {
        info!(dir = %dir.display(), "Serving static files");
    }

    let addr = config.bind_address;
    let server = Server::new(credentials, config);

    server
        .run_with_shutdown(addr, async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
