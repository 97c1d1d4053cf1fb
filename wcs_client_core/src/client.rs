//! HTTP client for the dialog workspace service
//!
//! Thin reqwest wrapper implementing [`WorkspaceService`] against the
//! service's REST API: basic-auth credentials, a `version` query parameter
//! on every call, a configurable request timeout, and a bounded retry for
//! the idempotent export reads. The append-mode upsert is deliberately
//! never retried: append semantics could duplicate nodes if a partial
//! success were replayed.

use crate::error::{Error, Result, ServiceError, ValidationError};
use crate::service::WorkspaceService;
use crate::workspace::{DialogNode, EntityValue, WorkspaceExport};
use crate::ClientConfig;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Production [`WorkspaceService`] implementation over HTTPS.
#[derive(Debug)]
pub struct ConversationClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
    version: String,
    retry_count: u32,
    retry_delay: Duration,
}

impl ConversationClient {
    /// Create a client from a [`ClientConfig`].
    ///
    /// Fails with a validation error when credentials are missing or the
    /// service URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let username = config
            .username
            .ok_or_else(|| ValidationError::missing_parameter("username"))?;
        let password = config
            .password
            .ok_or_else(|| ValidationError::missing_parameter("password"))?;

        let base_url = Url::parse(&config.url).map_err(|_| {
            Error::Validation(ValidationError::invalid_parameter("url", "must be a valid URL"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "url",
                "must be an http(s) URL",
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(ServiceError::from_request)?;

        Ok(Self {
            http,
            base_url,
            username,
            password,
            version: config.version,
            retry_count: config.retry_count,
            retry_delay: Duration::from_secs(2),
        })
    }

    /// Override the pause between retry attempts (default two seconds).
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Build a URL under the service base, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            // Checked at construction: the base URL is hierarchical.
            let mut parts = url
                .path_segments_mut()
                .expect("base URL is hierarchical");
            parts.pop_if_empty();
            parts.extend(segments);
        }
        url.query_pairs_mut().append_pair("version", &self.version);
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Turn a non-success response into a service error with the raw body.
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Service(ServiceError::api(status.as_u16(), &body)))
    }

    /// GET with bounded retry on transient failures.
    ///
    /// Export reads are idempotent, so replaying them is safe.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut attempt = 0u32;
        loop {
            let outcome = async {
                let response = self
                    .request(Method::GET, url.clone())
                    .send()
                    .await
                    .map_err(ServiceError::from_request)?;
                let response = Self::check_status(response).await?;
                response
                    .json::<T>()
                    .await
                    .map_err(|e| Error::Service(ServiceError::from_request(e)))
            }
            .await;

            match outcome {
                Err(Error::Service(ref service_err))
                    if service_err.is_transient() && attempt < self.retry_count =>
                {
                    attempt += 1;
                    warn!(
                        "transient service failure ({service_err}), retry {attempt}/{}",
                        self.retry_count
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl WorkspaceService for ConversationClient {
    async fn get_workspace(&self, workspace_id: &str) -> Result<WorkspaceExport> {
        let mut url = self.endpoint(&["workspaces", workspace_id]);
        url.query_pairs_mut().append_pair("export", "true");
        debug!("fetching export of workspace {workspace_id}");
        self.get_json(url).await
    }

    async fn delete_dialog_node(&self, workspace_id: &str, dialog_node: &str) -> Result<()> {
        let url = self.endpoint(&["workspaces", workspace_id, "dialog_nodes", dialog_node]);
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(ServiceError::from_request)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn append_dialog_nodes(&self, workspace_id: &str, nodes: &[DialogNode]) -> Result<()> {
        let mut url = self.endpoint(&["workspaces", workspace_id]);
        url.query_pairs_mut().append_pair("append", "true");

        debug!(
            "appending {} dialog nodes to workspace {workspace_id}",
            nodes.len()
        );
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({ "dialog_nodes": nodes }))
            .send()
            .await
            .map_err(ServiceError::from_request)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn get_value(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
    ) -> Result<EntityValue> {
        let mut url = self.endpoint(&[
            "workspaces",
            workspace_id,
            "entities",
            entity,
            "values",
            value,
        ]);
        url.query_pairs_mut().append_pair("export", "true");
        self.get_json(url).await
    }

    async fn update_value_synonyms(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonyms: &[String],
    ) -> Result<()> {
        let url = self.endpoint(&[
            "workspaces",
            workspace_id,
            "entities",
            entity,
            "values",
            value,
        ]);
        let response = self
            .request(Method::POST, url)
            .json(&serde_json::json!({ "synonyms": synonyms }))
            .send()
            .await
            .map_err(ServiceError::from_request)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_synonym(
        &self,
        workspace_id: &str,
        entity: &str,
        value: &str,
        synonym: &str,
    ) -> Result<()> {
        let url = self.endpoint(&[
            "workspaces",
            workspace_id,
            "entities",
            entity,
            "values",
            value,
            "synonyms",
            synonym,
        ]);
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(ServiceError::from_request)?;
        Self::check_status(response).await?;
        Ok(())
    }
}
