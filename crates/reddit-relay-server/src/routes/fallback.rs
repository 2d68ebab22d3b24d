//! Unmatched routes.

use crate::error::ServerError;

/// 404 for anything no route (or static file) handles.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
