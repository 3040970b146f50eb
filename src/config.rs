//! Configuration management for Stable-Fingerprint

use crate::storage::{COOKIE_MAX_AGE_SECS, INSTALL_ID_KEY};
use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Runtime configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CDP HTTP/WebSocket endpoint of the browser (e.g. "ws://localhost:9222")
    pub cdp_endpoint: String,

    /// WebSocket URL of a specific page target; the first page target is used when unset
    pub target_url: Option<String>,

    /// Timeout for a single CDP command in milliseconds
    pub command_timeout_ms: u64,

    /// Durable storage key and cookie name holding the install identifier
    pub storage_key: String,

    /// Max-Age of the mirrored install identifier cookie, in seconds
    pub cookie_max_age_secs: u64,

    /// Base URL of the onboarding API; submission is skipped when unset
    pub api_base_url: Option<String>,

    /// Application version reported with the fingerprint
    pub app_version: Option<String>,

    /// Refuse to submit over plain HTTP
    pub require_https: bool,

    /// Timeout for the onboarding request in milliseconds
    pub request_timeout_ms: u64,

    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cdp_endpoint: "ws://localhost:9222".to_string(),
            target_url: None,
            command_timeout_ms: 30000,
            storage_key: INSTALL_ID_KEY.to_string(),
            cookie_max_age_secs: COOKIE_MAX_AGE_SECS,
            api_base_url: None,
            app_version: None,
            require_https: true,
            request_timeout_ms: 15000,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(endpoint) = env::var("STABLEFP_CDP_ENDPOINT") {
            config.cdp_endpoint = endpoint;
        }

        if let Ok(target_url) = env::var("STABLEFP_TARGET_URL") {
            config.target_url = Some(target_url);
        }

        if let Ok(timeout) = env::var("STABLEFP_COMMAND_TIMEOUT") {
            config.command_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid STABLEFP_COMMAND_TIMEOUT"))?;
        }

        if let Ok(key) = env::var("STABLEFP_STORAGE_KEY") {
            config.storage_key = key;
        }

        if let Ok(max_age) = env::var("STABLEFP_COOKIE_MAX_AGE") {
            config.cookie_max_age_secs = max_age
                .parse()
                .map_err(|_| Error::configuration("Invalid STABLEFP_COOKIE_MAX_AGE"))?;
        }

        if let Ok(base_url) = env::var("STABLEFP_API_BASE_URL") {
            config.api_base_url = Some(base_url);
        }

        if let Ok(app_version) = env::var("STABLEFP_APP_VERSION") {
            config.app_version = Some(app_version);
        }

        if let Ok(require_https) = env::var("STABLEFP_REQUIRE_HTTPS") {
            config.require_https = require_https
                .parse()
                .map_err(|_| Error::configuration("Invalid STABLEFP_REQUIRE_HTTPS"))?;
        }

        if let Ok(timeout) = env::var("STABLEFP_REQUEST_TIMEOUT") {
            config.request_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid STABLEFP_REQUEST_TIMEOUT"))?;
        }

        if let Ok(log_level) = env::var("STABLEFP_LOG_LEVEL") {
            config.log_level = log_level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(Error::configuration("storage_key must not be empty"));
        }
        if self.command_timeout_ms == 0 {
            return Err(Error::configuration("command_timeout_ms must be positive"));
        }
        Ok(())
    }
}
