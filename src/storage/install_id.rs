//! Durable per-install identifier
//!
//! The id lives in primary storage and is mirrored to a cookie. Either copy
//! keeps it alive; when neither backend works a fresh id is produced on every
//! call.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cookie::{read_cookie, SetCookie};
use super::traits::{CookieJar, KeyValueStore};
use super::{COOKIE_MAX_AGE_SECS, INSTALL_ID_KEY};

/// Reads, creates and persists the install id
#[derive(Clone)]
pub struct InstallIdStore {
    primary: Arc<dyn KeyValueStore>,
    cookies: Arc<dyn CookieJar>,
    key: String,
    cookie_max_age_secs: u64,
}

impl std::fmt::Debug for InstallIdStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallIdStore")
            .field("key", &self.key)
            .field("cookie_max_age_secs", &self.cookie_max_age_secs)
            .finish()
    }
}

impl InstallIdStore {
    pub fn new(primary: Arc<dyn KeyValueStore>, cookies: Arc<dyn CookieJar>) -> Self {
        Self {
            primary,
            cookies,
            key: INSTALL_ID_KEY.to_string(),
            cookie_max_age_secs: COOKIE_MAX_AGE_SECS,
        }
    }

    /// Store the id under `key` in both backends
    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_cookie_max_age(mut self, secs: u64) -> Self {
        self.cookie_max_age_secs = secs;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Return the install id, creating and persisting it when neither backend
    /// has one. Never fails and never returns an empty string.
    pub async fn ensure_install_id(&self) -> String {
        if let Some(id) = self.read_primary().await {
            return id;
        }

        let id = match self.read_cookie().await {
            Some(id) => {
                info!("Restoring install id from cookie");
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                info!("Generated new install id");
                id
            }
        };

        let stored = self.persist(&id).await;
        if !stored {
            warn!("No storage backend accepted the install id; it will not survive this call");
        }
        id
    }

    async fn read_primary(&self) -> Option<String> {
        match self.primary.get_item(&self.key).await {
            Ok(Some(id)) if !id.is_empty() => Some(id),
            Ok(_) => None,
            Err(e) => {
                debug!("Primary storage read failed: {}", e);
                None
            }
        }
    }

    async fn read_cookie(&self) -> Option<String> {
        match self.cookies.cookie_header().await {
            Ok(header) => read_cookie(&header, &self.key).filter(|id| !id.is_empty()),
            Err(e) => {
                debug!("Cookie read failed: {}", e);
                None
            }
        }
    }

    /// Write both backends independently; true when at least one succeeded
    async fn persist(&self, id: &str) -> bool {
        let primary = match self.primary.set_item(&self.key, id).await {
            Ok(()) => true,
            Err(e) => {
                debug!("Primary storage write failed: {}", e);
                false
            }
        };

        let cookie = SetCookie::new(self.key.as_str(), id, self.cookie_max_age_secs);
        let mirrored = match self.cookies.set_cookie(&cookie).await {
            Ok(()) => true,
            Err(e) => {
                debug!("Cookie write failed: {}", e);
                false
            }
        };

        primary || mirrored
    }
}
