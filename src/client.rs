//! The `GoCDClient` facade composing transport, URL building and the parsers.

use indexmap::IndexMap;
use log::debug;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::config::GoCDConfig;
use crate::error::{GoCDError, Result};
use crate::history::{self, PipelineHistory};
use crate::index;
use crate::types::{PipelineDependency, PipelineRunStatus, PipelineStatus};
use crate::vsm::{self, ValueStreamMap};

/// Read-only client for one GoCD server.
///
/// Holds nothing but the server URL, the credentials and the HTTP client; every
/// operation issues exactly one GET request and carries no state across calls,
/// so a single instance can serve concurrent callers. There is no retry or
/// caching at this layer.
pub struct GoCDClient {
    client: Client,
    server: Url,
    username: Option<String>,
    password: Option<String>,
}

impl GoCDClient {
    pub fn new(config: GoCDConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gocd-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GoCDError::Config(format!("Failed to create HTTP client: {e}")))?;

        let mut server = Url::parse(&config.server)
            .map_err(|e| GoCDError::Config(format!("Invalid server URL: {e}")))?;

        // Resource paths are joined relative to the server path, so it must
        // end in a slash or `join` would drop its last segment.
        if !server.path().ends_with('/') {
            server.set_path(&format!("{}/", server.path()));
        }

        Ok(Self {
            client,
            server,
            username: config.username,
            password: config.password,
        })
    }

    /// Convenience constructor for anonymous access.
    pub fn from_server(server: &str) -> Result<Self> {
        Self::new(GoCDConfig::new(server))
    }

    /// Lists pipeline names from the server index, in document order.
    ///
    /// `None` or an empty prefix returns every pipeline; otherwise only names
    /// starting with the prefix are returned.
    pub async fn list_pipelines(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let document = self.get_text("go/api/pipelines.xml").await?;
        Ok(index::pipeline_names(&document, prefix))
    }

    /// Fetches the current gating state of a pipeline.
    pub async fn pipeline_status(&self, pipeline: &str) -> Result<PipelineStatus> {
        let resource = format!("go/api/pipelines/{}/status", urlencoding::encode(pipeline));
        let document = self.get_text(&resource).await?;
        Ok(serde_json::from_str(&document)?)
    }

    /// Resolves the upstream dependency chain of one pipeline run from its
    /// value-stream map.
    ///
    /// The first entry is always `(pipeline, version)` itself; see
    /// [`vsm::upstream_dependencies`] for the walk semantics.
    pub async fn upstream_dependencies(
        &self,
        pipeline: &str,
        version: u32,
    ) -> Result<Vec<PipelineDependency>> {
        let resource = format!(
            "go/pipelines/value_stream_map/{}/{}.json",
            urlencoding::encode(pipeline),
            version
        );
        let document: ValueStreamMap = serde_json::from_str(&self.get_text(&resource).await?)?;
        vsm::upstream_dependencies(&document, pipeline, version)
    }

    /// Fetches the most recent page of run verdicts for a pipeline.
    pub async fn run_history(
        &self,
        pipeline: &str,
    ) -> Result<IndexMap<u32, PipelineRunStatus>> {
        self.run_history_from(pipeline, 0).await
    }

    /// Fetches one page of run verdicts starting at `offset`, keyed by run
    /// counter and iterating most recent first. Runs still preparing to
    /// schedule are excluded.
    pub async fn run_history_from(
        &self,
        pipeline: &str,
        offset: u32,
    ) -> Result<IndexMap<u32, PipelineRunStatus>> {
        let resource = format!(
            "go/api/pipelines/{}/history/{}",
            urlencoding::encode(pipeline),
            offset
        );
        let document: PipelineHistory = serde_json::from_str(&self.get_text(&resource).await?)?;
        Ok(history::run_statuses(pipeline, &document))
    }

    fn build_url(&self, resource: &str) -> Result<Url> {
        self.server
            .join(resource.trim_start_matches('/'))
            .map_err(|e| GoCDError::Config(format!("Invalid resource URL '{resource}': {e}")))
    }

    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(username) => request.basic_auth(username, self.password.as_deref()),
            None => request,
        }
    }

    async fn get_text(&self, resource: &str) -> Result<String> {
        let url = self.build_url(resource)?;
        debug!("GET {url}");

        let response = self.auth_request(self.client.get(url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(GoCDError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &str) -> GoCDClient {
        GoCDClient::from_server(server).unwrap()
    }

    #[test]
    fn test_build_url_joins_server_and_resource() {
        let url = client("https://go.example.com")
            .build_url("go/api/pipelines.xml")
            .unwrap();
        assert_eq!(url.as_str(), "https://go.example.com/go/api/pipelines.xml");
    }

    #[test]
    fn test_build_url_keeps_server_context_path() {
        let url = client("https://go.example.com/context")
            .build_url("go/api/pipelines.xml")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://go.example.com/context/go/api/pipelines.xml"
        );
    }

    #[test]
    fn test_build_url_normalizes_redundant_segments() {
        let url = client("https://go.example.com")
            .build_url("go/api/../api/pipelines.xml")
            .unwrap();
        assert_eq!(url.as_str(), "https://go.example.com/go/api/pipelines.xml");
    }

    #[test]
    fn test_build_url_tolerates_leading_slash() {
        let url = client("https://go.example.com")
            .build_url("/go/api/pipelines.xml")
            .unwrap();
        assert_eq!(url.as_str(), "https://go.example.com/go/api/pipelines.xml");
    }

    #[test]
    fn test_invalid_server_url_is_rejected_eagerly() {
        let result = GoCDClient::from_server("not a url");
        assert!(matches!(result, Err(GoCDError::Config(_))));
    }
}
