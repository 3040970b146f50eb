//! Common test utilities
//!
//! Shared helpers and fixtures for the integration tests.

#![allow(dead_code)]

use stable_fingerprint::cdp::{CdpBrowser, CdpBrowserImpl, CdpClient};
use stable_fingerprint::config::Config;
use stable_fingerprint::signals::MockSignalSource;
use stable_fingerprint::storage::{InstallIdStore, MemoryCookieJar, MemoryStore};
use stable_fingerprint::{FingerprintEngine, FingerprintResult};
use std::sync::Arc;
use std::time::Duration;

/// Configuration pointing at a local mock browser
pub fn test_config(cdp_endpoint: &str) -> Config {
    Config {
        cdp_endpoint: cdp_endpoint.to_string(),
        command_timeout_ms: 5000,
        require_https: false,
        ..Config::default()
    }
}

/// Attach a client to a page WebSocket URL
pub async fn connect_page(ws_url: &str) -> Result<Arc<dyn CdpClient>, Box<dyn std::error::Error>> {
    let browser = CdpBrowserImpl::new(ws_url).with_command_timeout(Duration::from_secs(5));
    Ok(browser.create_client(ws_url).await?)
}

/// A fingerprint computed from the in-memory mock source
pub async fn sample_fingerprint() -> FingerprintResult {
    let ids = InstallIdStore::new(Arc::new(MemoryStore::new()), Arc::new(MemoryCookieJar::new()));
    FingerprintEngine::new(Arc::new(MockSignalSource::new()), ids)
        .compute()
        .await
        .expect("mock fingerprint")
}

/// Assert `id` is a lowercase hyphenated UUID v4
pub fn assert_uuid_v4(id: &str) {
    let parsed = uuid::Uuid::parse_str(id).expect("install id is a UUID");
    assert_eq!(parsed.get_version_num(), 4);
    assert_eq!(parsed.hyphenated().to_string(), id);
    assert!(matches!(id.as_bytes()[19], b'8' | b'9' | b'a' | b'b'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_fingerprint() {
        let result = sample_fingerprint().await;
        assert_eq!(result.digest.len(), 64);
        assert_uuid_v4(&result.data.install_id);
    }
}
