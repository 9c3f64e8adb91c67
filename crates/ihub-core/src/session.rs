//! Session store trait.
//!
//! Defines the interface for holding the authentication token's lifecycle:
//! presence, persistence across restarts, and invalidation.

use crate::error::Result;

/// Store for the active authentication credential.
///
/// The token is opaque to the client. No expiry tracking is performed
/// locally; validity is determined reactively by the remote service
/// rejecting a request.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - The token file has appropriate permissions (e.g., 600 on Unix)
/// - The token is never logged or exposed in error messages
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the active token, or `None` when no session exists.
    async fn current_token(&self) -> Option<String>;

    /// Persists the token and makes it the active credential.
    async fn set_token(&self, token: String) -> Result<()>;

    /// Removes the active credential from memory and durable storage.
    async fn clear_token(&self) -> Result<()>;
}
