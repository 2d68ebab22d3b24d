//! API routes.

pub mod fallback;
pub mod health;
pub mod reddit;
pub mod token;

pub use fallback::not_found;
pub use health::{HealthResponse, InfoResponse, health_routes};
pub use reddit::{PROXY_PREFIX, reddit_proxy_handler};
pub use token::{TokenBody, TokenRequest, token_handler};
