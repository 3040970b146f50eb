//! Onboarding submission client

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::types::{PreparationRequest, PreparationResponse};
use crate::config::Config;
use crate::fingerprint::FingerprintResult;
use crate::{Error, Result};

/// Submits fingerprints to the onboarding API
///
/// The underlying client keeps a cookie store so the visitor cookie set by
/// the server is sent back on later requests.
#[derive(Debug, Clone)]
pub struct OnboardingClient {
    http: reqwest::Client,
    base_url: String,
}

impl OnboardingClient {
    /// Create a client for `base_url`
    ///
    /// With `require_https`, a non-HTTPS base URL is rejected up front and the
    /// client refuses plain HTTP redirects.
    pub fn new(base_url: &str, require_https: bool, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::configuration("API base URL is empty"));
        }
        if require_https && !base_url.starts_with("https://") {
            return Err(Error::configuration(format!(
                "API base URL must use HTTPS: {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .https_only(require_https)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Create a client from configuration; requires `api_base_url`
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config
            .api_base_url
            .as_deref()
            .ok_or_else(|| Error::configuration("api_base_url is not set"))?;
        Self::new(
            base_url,
            config.require_https,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}/onboarding/preparation` with the fingerprint and its record
    pub async fn prepare(&self, app_version: &str, result: &FingerprintResult) -> Result<PreparationResponse> {
        if app_version.is_empty() {
            return Err(Error::invalid_input("appVersion is required."));
        }

        let url = format!("{}/onboarding/preparation", self.base_url);
        let body = PreparationRequest {
            app_version,
            fingerprint: &result.digest,
            extra_data: &result.data,
        };

        debug!("Submitting fingerprint to {}", url);
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Onboarding preparation rate-limited");
            return Err(Error::TooManyRequests);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let preparation: PreparationResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Error::invalid_response(e.to_string()))?;

        info!("Onboarding prepared for visitor {}", preparation.visitor_id);
        Ok(preparation)
    }
}
