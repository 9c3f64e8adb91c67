//! Remote insight service trait.
//!
//! One operation per remote capability. Every operation is a pure function
//! of (token, arguments) -> result-or-error: no memory of prior calls, no
//! retry, no local mutation. All cache and view updates are the caller's
//! responsibility.

use crate::analysis::{Cluster, Extraction};
use crate::error::Result;
use crate::insight::{Insight, InsightDraft};
use crate::user::UserProfile;

/// Stateless request layer against the remote insight service.
///
/// Private capabilities take the bearer token explicitly; the service
/// never reads it from ambient state. Failure variants follow the
/// client-wide taxonomy: `Auth` for rejected credentials, `Validation`
/// for malformed fields, `NotFound` for unknown ids and `Upstream` for
/// server-side derivation failures.
#[async_trait::async_trait]
pub trait InsightService: Send + Sync {
    /// Exchanges credentials for a bearer token. Never mutates session
    /// state; the caller decides what to do with the token.
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    /// Creates an account. Never auto-authenticates.
    async fn register(&self, email: &str, password: &str) -> Result<UserProfile>;

    /// Returns the profile the token belongs to.
    async fn me(&self, token: &str) -> Result<UserProfile>;

    /// Returns all insights owned by the token's user, in server order.
    async fn list(&self, token: &str) -> Result<Vec<Insight>>;

    /// Creates an insight and returns it with server-computed fields.
    async fn create(&self, token: &str, draft: &InsightDraft) -> Result<Insight>;

    /// Updates an existing insight's editable fields.
    async fn update(&self, token: &str, id: i64, draft: &InsightDraft) -> Result<Insight>;

    /// Deletes an insight. A repeat delete of an already-removed id fails
    /// with `NotFound`; the caller treats the subsequent list refresh as
    /// authoritative.
    async fn delete(&self, token: &str, id: i64) -> Result<()>;

    /// Runs extraction over a saved insight's content.
    async fn extract(&self, token: &str, id: i64) -> Result<Extraction>;

    /// Runs extraction over unsaved text without persisting anything.
    async fn extract_raw(&self, token: &str, draft: &InsightDraft) -> Result<Extraction>;

    /// Recomputes the cross-insight clustering.
    async fn clusters(&self, token: &str) -> Result<Vec<Cluster>>;
}
