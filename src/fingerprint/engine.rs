//! Fingerprint orchestration

use std::sync::Arc;
use tracing::{debug, info};

use super::canonical::{canonicalize, Node};
use super::digest::hash_hex;
use super::types::{FingerprintData, FingerprintResult};
use crate::cdp::CdpClient;
use crate::config::Config;
use crate::signals::{self, CanvasSpec, CdpSignalSource, SignalSource, STABLE_CANVAS};
use crate::storage::{CdpCookieJar, CdpLocalStorage, InstallIdStore};
use crate::Result;

/// Canonical text of a record, the exact input of its digest
pub fn canonical_text(data: &FingerprintData) -> Result<String> {
    Ok(canonicalize(&Node::from_serialize(data)?))
}

/// Digest of a record
pub fn digest_of(data: &FingerprintData) -> Result<String> {
    Ok(hash_hex(&canonical_text(data)?))
}

/// Collects every signal plus the install id and hashes the result
#[derive(Debug, Clone)]
pub struct FingerprintEngine {
    source: Arc<dyn SignalSource>,
    install_ids: InstallIdStore,
    canvas: CanvasSpec,
}

impl FingerprintEngine {
    pub fn new(source: Arc<dyn SignalSource>, install_ids: InstallIdStore) -> Self {
        Self {
            source,
            install_ids,
            canvas: STABLE_CANVAS,
        }
    }

    /// Engine that probes and stores through one attached page
    pub fn for_page(client: Arc<dyn CdpClient>, config: &Config) -> Self {
        let install_ids = InstallIdStore::new(
            Arc::new(CdpLocalStorage::new(client.clone())),
            Arc::new(CdpCookieJar::new(client.clone())),
        )
        .with_key(config.storage_key.clone())
        .with_cookie_max_age(config.cookie_max_age_secs);

        Self::new(Arc::new(CdpSignalSource::new(client)), install_ids)
    }

    /// Hash a different reference drawing
    pub fn with_canvas(mut self, canvas: CanvasSpec) -> Self {
        self.canvas = canvas;
        self
    }

    /// Gather the raw record. Never fails; unavailable signals are absent.
    pub async fn collect(&self) -> FingerprintData {
        let source = self.source.as_ref();

        let install_id = self.install_ids.ensure_install_id().await;
        let user_agent = signals::collect_user_agent(source).await;
        let locale = signals::collect_locale(source).await;
        let screen = signals::collect_screen(source).await;
        let hardware = signals::collect_hardware(source).await;
        let user_agent_data = signals::collect_user_agent_data(source).await;
        let webgl = signals::collect_webgl(source).await;
        let canvas_hash = signals::collect_canvas_hash(source, &self.canvas).await;

        FingerprintData {
            user_agent,
            user_agent_data,
            primary_language: locale.primary_language,
            languages: locale.languages,
            time_zone: locale.time_zone,
            time_zone_offset_minutes: locale.time_zone_offset_minutes,
            screen,
            hardware,
            webgl,
            canvas_hash,
            install_id,
        }
    }

    /// Collect, canonicalize and hash
    pub async fn compute(&self) -> Result<FingerprintResult> {
        let data = self.collect().await;
        let digest = digest_of(&data)?;

        info!("Computed fingerprint {}", digest);
        debug!(
            "Fingerprint signals: ua_data={} webgl={} canvas={} tz={}",
            data.user_agent_data.is_some(),
            data.webgl.is_some(),
            data.canvas_hash.is_some(),
            data.time_zone.is_some()
        );

        Ok(FingerprintResult { digest, data })
    }
}
