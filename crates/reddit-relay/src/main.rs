//! reddit-relay - backend for Reddit OAuth in the browser
//!
//! Main entry point for the relay binary.

use anyhow::Result;
use clap::Parser;

mod start;

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// reddit-relay - exchanges Reddit OAuth codes and proxies API calls
#[derive(Parser)]
#[command(name = "reddit-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub start: start::StartArgs,
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let default_filter = if cli.verbose {
        "reddit_relay=debug,reddit_relay_server=debug,reddit_relay_oauth=debug,tower_http=debug,info"
    } else {
        "reddit_relay=info,reddit_relay_server=info,reddit_relay_oauth=info,warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(filter),
        )
        .init();

    start::run(cli.start).await
}
