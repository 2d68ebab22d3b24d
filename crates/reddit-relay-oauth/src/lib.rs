//! Reddit OAuth client for the relay.
//!
//! Keeps the client secret on the server: the browser hands the relay an
//! authorization code, the relay exchanges it with Reddit, and later API calls
//! are forwarded to `oauth.reddit.com` with the caller's bearer token.
//!
//! # Components
//!
//! - [`oauth`] — Provider credentials and the authorization-code exchange
//! - [`passthrough`] — GET forwarding to the authenticated API host

pub mod error;
pub mod oauth;
pub mod passthrough;

pub use error::{OAuthError, Result};
pub use oauth::{
    ProviderCredentials, REDDIT_API_URL, REDDIT_TOKEN_URL, TokenExchangeResult,
    exchange_code_for_tokens,
};
pub use passthrough::{Passthrough, ProxyResponse};
