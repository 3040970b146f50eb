//! Signal source backed by a live page over CDP

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::scripts::*;
use super::traits::*;
use crate::cdp::CdpClient;
use crate::fingerprint::{Hardware, WebGlInfo};
use crate::Error;

/// Probes a page through `Runtime.evaluate`
#[derive(Debug, Clone)]
pub struct CdpSignalSource {
    client: Arc<dyn CdpClient>,
}

impl CdpSignalSource {
    /// Create a signal source over an attached client
    pub fn new(client: Arc<dyn CdpClient>) -> Self {
        Self { client }
    }

    /// Evaluate `script` and decode its JSON result
    async fn eval<T: DeserializeOwned>(&self, script: &str, await_promise: bool) -> Result<T, Error> {
        let value = self.client.evaluate(script, await_promise).await?.into_value();
        debug!("Probe returned {}", value);
        serde_json::from_value(value)
            .map_err(|e| Error::signal_unavailable(format!("unexpected probe result: {}", e)))
    }
}

#[async_trait]
impl SignalSource for CdpSignalSource {
    async fn user_agent(&self) -> Result<String, Error> {
        self.eval(USER_AGENT_SCRIPT, false).await
    }

    async fn languages(&self) -> Result<Vec<String>, Error> {
        self.eval(LANGUAGES_SCRIPT, false).await
    }

    async fn time_zone(&self) -> Result<Option<String>, Error> {
        self.eval(TIME_ZONE_SCRIPT, false).await
    }

    async fn time_zone_offset_minutes(&self) -> Result<i32, Error> {
        self.eval(TIME_ZONE_OFFSET_SCRIPT, false).await
    }

    async fn screen(&self) -> Result<Option<RawScreen>, Error> {
        self.eval(SCREEN_SCRIPT, false).await
    }

    async fn hardware(&self) -> Result<Hardware, Error> {
        self.eval(HARDWARE_SCRIPT, false).await
    }

    async fn user_agent_data(&self) -> Result<Option<UaBaseline>, Error> {
        self.eval(UA_DATA_SCRIPT, false).await
    }

    async fn high_entropy_values(&self, hints: &[&str]) -> Result<HighEntropyValues, Error> {
        self.eval(&high_entropy_script(hints), true).await
    }

    async fn webgl(&self) -> Result<Option<WebGlInfo>, Error> {
        self.eval(WEBGL_SCRIPT, false).await
    }

    async fn render_canvas(&self, spec: &CanvasSpec) -> Result<Option<String>, Error> {
        self.eval(&canvas_script(spec), false).await
    }
}
