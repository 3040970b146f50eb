//! In-memory storage backends
//!
//! Used by tests and by hosts without a page. An access mode simulates
//! privacy-mode browsers that refuse writes or all access.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::cookie::SetCookie;
use super::traits::{CookieJar, KeyValueStore};
use crate::Error;

/// What a backend allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreAccess {
    #[default]
    ReadWrite,
    /// Reads succeed, writes fail (quota exhausted)
    ReadOnly,
    /// Every access fails (storage disabled by policy)
    Blocked,
}

impl StoreAccess {
    fn check_read(self, what: &str) -> Result<(), Error> {
        match self {
            StoreAccess::Blocked => Err(Error::storage_unavailable(format!("{} access is blocked", what))),
            _ => Ok(()),
        }
    }

    fn check_write(self, what: &str) -> Result<(), Error> {
        match self {
            StoreAccess::ReadWrite => Ok(()),
            StoreAccess::ReadOnly => Err(Error::storage_unavailable(format!("{} quota exceeded", what))),
            StoreAccess::Blocked => Err(Error::storage_unavailable(format!("{} access is blocked", what))),
        }
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
    access: RwLock<StoreAccess>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access(access: StoreAccess) -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            access: RwLock::new(access),
        }
    }

    /// Change the access mode, keeping the stored items
    pub async fn set_access(&self, access: StoreAccess) {
        *self.access.write().await = access;
    }

    /// Read an item regardless of the access mode
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    /// Remove every item regardless of the access mode
    pub async fn clear(&self) {
        self.items.write().await.clear();
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        self.access.read().await.check_read("storage")?;
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.access.read().await.check_write("storage")?;
        self.items.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// In-memory cookie jar keeping insertion order
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RwLock<Vec<(String, String)>>,
    assignments: RwLock<Vec<String>>,
    access: RwLock<StoreAccess>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access(access: StoreAccess) -> Self {
        Self {
            access: RwLock::new(access),
            ..Self::default()
        }
    }

    pub async fn set_access(&self, access: StoreAccess) {
        *self.access.write().await = access;
    }

    /// Value of cookie `name` regardless of the access mode
    pub async fn peek(&self, name: &str) -> Option<String> {
        self.cookies
            .read()
            .await
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Every accepted assignment string, in order
    pub async fn assignments(&self) -> Vec<String> {
        self.assignments.read().await.clone()
    }

    pub async fn clear(&self) {
        self.cookies.write().await.clear();
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn cookie_header(&self) -> Result<String, Error> {
        self.access.read().await.check_read("cookie")?;
        let cookies = self.cookies.read().await;
        Ok(cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("; "))
    }

    async fn set_cookie(&self, cookie: &SetCookie) -> Result<(), Error> {
        self.access.read().await.check_write("cookie")?;

        let mut cookies = self.cookies.write().await;
        if cookie.max_age_secs == 0 {
            cookies.retain(|(name, _)| name != &cookie.name);
        } else if let Some(existing) = cookies.iter_mut().find(|(name, _)| name == &cookie.name) {
            existing.1 = cookie.value.clone();
        } else {
            cookies.push((cookie.name.clone(), cookie.value.clone()));
        }

        self.assignments.write().await.push(cookie.to_string());
        Ok(())
    }
}

