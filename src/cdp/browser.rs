//! CDP browser discovery
//!
//! Finds page targets through the DevTools HTTP endpoint and attaches clients
//! to them.

use super::client::CdpClientImpl;
use super::connection::{CdpWebSocketConnection, DEFAULT_COMMAND_TIMEOUT};
use super::traits::*;
use super::types::{TargetDescriptor, VersionDescriptor};
use crate::Error;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// CDP browser implementation
#[derive(Debug)]
pub struct CdpBrowserImpl {
    /// Browser endpoint (e.g., "ws://localhost:9222")
    endpoint: String,
    /// HTTP client for the discovery endpoints
    http: reqwest::Client,
    /// Timeout for commands on attached clients
    command_timeout: Duration,
}

impl CdpBrowserImpl {
    /// Create a new CDP browser handle
    ///
    /// # Arguments
    /// * `endpoint` - Browser endpoint (e.g., "ws://localhost:9222")
    pub fn new<S: Into<String>>(endpoint: S) -> Self {
        let endpoint = endpoint.into();
        info!("Creating CDP browser handle for endpoint: {}", endpoint);
        Self {
            endpoint,
            http: reqwest::Client::new(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Override the per-command timeout of attached clients
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// HTTP base URL of the DevTools endpoint
    fn http_endpoint(&self) -> String {
        self.endpoint
            .replace("ws://", "http://")
            .replace("wss://", "https://")
            .trim_end_matches('/')
            .to_string()
    }

    /// Attach a client to the first page target
    pub async fn page_client(&self) -> Result<Arc<dyn CdpClient>, Error> {
        let targets = self.get_targets().await?;
        let ws_url = targets
            .into_iter()
            .filter(|t| t.target_type == "page")
            .find_map(|t| t.web_socket_debugger_url)
            .ok_or_else(|| Error::cdp(format!("No page target available at {}", self.endpoint)))?;

        self.create_client(&ws_url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = format!("{}{}", self.http_endpoint(), path);
        debug!("Fetching {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::cdp(format!("Failed to reach browser at {}: {}", url, e)))?;

        response
            .json()
            .await
            .map_err(|e| Error::cdp(format!("Failed to parse {}: {}", url, e)))
    }
}

#[async_trait]
impl CdpBrowser for CdpBrowserImpl {
    /// Create a new CDP client attached to a target WebSocket URL
    async fn create_client(&self, target_url: &str) -> Result<Arc<dyn CdpClient>, Error> {
        info!("Creating CDP client for target: {}", target_url);

        let connection = CdpWebSocketConnection::connect(target_url, self.command_timeout).await?;
        let client = Arc::new(CdpClientImpl::new(connection));

        // Only Runtime is needed for evaluation
        client.enable_domain("Runtime").await?;

        Ok(client)
    }

    /// Get browser version
    async fn get_version(&self) -> Result<BrowserVersion, Error> {
        let version: VersionDescriptor = self.get_json("/json/version").await?;
        Ok(BrowserVersion {
            protocol_version: version.protocol_version,
            product: version.browser,
            user_agent: version.user_agent,
        })
    }

    /// List all targets
    async fn get_targets(&self) -> Result<Vec<TargetInfo>, Error> {
        let targets: Vec<TargetDescriptor> = self.get_json("/json/list").await?;
        Ok(targets
            .into_iter()
            .map(|t| TargetInfo {
                target_id: t.id,
                target_type: t.target_type,
                title: t.title,
                url: t.url,
                web_socket_debugger_url: t.web_socket_debugger_url,
            })
            .collect())
    }
}
