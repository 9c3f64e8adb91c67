//! HTTP implementation of the remote insight service.
//!
//! Each operation is a single request/response round trip with no retry.
//! Failures are mapped onto the client-wide error taxonomy from the HTTP
//! status class; the FastAPI-style `{"detail": ...}` body is used as the
//! message when present.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use ihub_core::analysis::{Cluster, Extraction};
use ihub_core::config::ClientConfig;
use ihub_core::error::{IhubError, Result};
use ihub_core::insight::{Insight, InsightDraft};
use ihub_core::service::InsightService;
use ihub_core::user::UserProfile;

use crate::dto::{
    ClustersResponse, CredentialsRequest, DeleteAck, ErrorDetail, InsightFieldsRequest,
    TokenResponse,
};

/// Stateless HTTP client for the remote insight service.
///
/// Holds only the connection pool, the base URL and the per-request
/// timeout. All session and cache state lives with the caller.
#[derive(Clone)]
pub struct RemoteInsightClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RemoteInsightClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout: Duration::from_secs(ihub_core::config::DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| IhubError::network(e.to_string()))
    }

    /// Maps a non-success response onto the error taxonomy.
    ///
    /// `entity`/`id` describe what a 404 refers to.
    async fn failure(response: Response, entity: &'static str, id: Option<i64>) -> IhubError {
        let status = response.status();
        let detail = Self::error_detail(response).await;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IhubError::auth(detail),
            StatusCode::NOT_FOUND => IhubError::not_found(
                entity,
                id.map(|i| i.to_string()).unwrap_or_else(|| detail.clone()),
            ),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                IhubError::validation(detail)
            }
            s if s.is_server_error() => IhubError::upstream(detail),
            s => IhubError::internal(format!("unexpected status {}: {}", s, detail)),
        }
    }

    /// Extracts a human-readable message from an error response body.
    async fn error_detail(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if body.is_empty() {
            return status.to_string();
        }
        match serde_json::from_str::<ErrorDetail>(&body) {
            Ok(ErrorDetail {
                detail: Some(serde_json::Value::String(s)),
            }) => s,
            Ok(ErrorDetail {
                detail: Some(other),
            }) => other.to_string(),
            _ => body,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| IhubError::internal(format!("failed to decode {} response: {}", what, e)))
    }
}

#[async_trait]
impl InsightService for RemoteInsightClient {
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        tracing::debug!(email, "dispatching login");
        let response = self
            .send(
                self.client
                    .post(self.url("/auth/login"))
                    .json(&CredentialsRequest { email, password }),
            )
            .await?;

        // The service answers 400 for bad credentials; every non-success
        // on this endpoint is an authentication failure.
        if !response.status().is_success() {
            return Err(IhubError::auth(Self::error_detail(response).await));
        }
        let token: TokenResponse = Self::decode(response, "login").await?;
        Ok(token.access_token)
    }

    async fn register(&self, email: &str, password: &str) -> Result<UserProfile> {
        tracing::debug!(email, "dispatching register");
        let response = self
            .send(
                self.client
                    .post(self.url("/auth/register"))
                    .json(&CredentialsRequest { email, password }),
            )
            .await?;

        if !response.status().is_success() {
            return Err(IhubError::auth(Self::error_detail(response).await));
        }
        Self::decode(response, "register").await
    }

    async fn me(&self, token: &str) -> Result<UserProfile> {
        let response = self
            .send(self.client.get(self.url("/auth/me")).bearer_auth(token))
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "user", None).await);
        }
        Self::decode(response, "profile").await
    }

    async fn list(&self, token: &str) -> Result<Vec<Insight>> {
        tracing::debug!("dispatching insight list");
        let response = self
            .send(self.client.get(self.url("/insights/")).bearer_auth(token))
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "insight", None).await);
        }
        Self::decode(response, "insight list").await
    }

    async fn create(&self, token: &str, draft: &InsightDraft) -> Result<Insight> {
        tracing::debug!(title = %draft.title, "dispatching insight create");
        let response = self
            .send(
                self.client
                    .post(self.url("/insights/"))
                    .bearer_auth(token)
                    .json(&InsightFieldsRequest {
                        title: &draft.title,
                        content: &draft.content,
                        tags: &draft.tags,
                    }),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "insight", None).await);
        }
        Self::decode(response, "created insight").await
    }

    async fn update(&self, token: &str, id: i64, draft: &InsightDraft) -> Result<Insight> {
        tracing::debug!(id, "dispatching insight update");
        let response = self
            .send(
                self.client
                    .patch(self.url(&format!("/insights/{}", id)))
                    .bearer_auth(token)
                    .json(&InsightFieldsRequest {
                        title: &draft.title,
                        content: &draft.content,
                        tags: &draft.tags,
                    }),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "insight", Some(id)).await);
        }
        Self::decode(response, "updated insight").await
    }

    async fn delete(&self, token: &str, id: i64) -> Result<()> {
        tracing::debug!(id, "dispatching insight delete");
        let response = self
            .send(
                self.client
                    .delete(self.url(&format!("/insights/{}", id)))
                    .bearer_auth(token),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "insight", Some(id)).await);
        }
        let _ack: DeleteAck = Self::decode(response, "delete acknowledgement").await?;
        Ok(())
    }

    async fn extract(&self, token: &str, id: i64) -> Result<Extraction> {
        tracing::debug!(id, "dispatching extraction");
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/insights/{}/extract", id)))
                    .bearer_auth(token),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "insight", Some(id)).await);
        }
        Self::decode(response, "extraction").await
    }

    async fn extract_raw(&self, token: &str, draft: &InsightDraft) -> Result<Extraction> {
        tracing::debug!("dispatching raw extraction");
        let response = self
            .send(
                self.client
                    .post(self.url("/insights/extract"))
                    .bearer_auth(token)
                    .json(&InsightFieldsRequest {
                        title: &draft.title,
                        content: &draft.content,
                        tags: &draft.tags,
                    }),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "insight", None).await);
        }
        Self::decode(response, "extraction").await
    }

    async fn clusters(&self, token: &str) -> Result<Vec<Cluster>> {
        tracing::debug!("dispatching cluster request");
        let response = self
            .send(
                self.client
                    .get(self.url("/insights/clusters"))
                    .bearer_auth(token),
            )
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response, "clusters", None).await);
        }
        let envelope: ClustersResponse = Self::decode(response, "clusters").await?;
        Ok(envelope.clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let client = RemoteInsightClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/insights/"), "http://localhost:8000/insights/");
    }

    #[test]
    fn from_config_applies_timeout() {
        let config = ClientConfig {
            api_base_url: "http://notes.example".to_string(),
            request_timeout_secs: 5,
        };
        let client = RemoteInsightClient::from_config(&config);
        assert_eq!(client.base_url(), "http://notes.example");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }
}
