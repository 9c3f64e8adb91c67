//! Wire types for the remote insight service.
//!
//! Request bodies mirror what the service expects; response envelopes are
//! unwrapped into the core domain models before leaving this crate.

use ihub_core::analysis::Cluster;
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body for `POST /insights/` and `PATCH /insights/{id}`.
#[derive(Debug, Serialize)]
pub struct InsightFieldsRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub tags: &'a str,
}

/// Envelope of `GET /insights/clusters`.
#[derive(Debug, Deserialize)]
pub struct ClustersResponse {
    #[serde(default)]
    pub clusters: Vec<Cluster>,
}

/// Acknowledgement of `DELETE /insights/{id}`.
#[derive(Debug, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// FastAPI-style error body: `{ "detail": "..." }`.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub detail: Option<serde_json::Value>,
}
