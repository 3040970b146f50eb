//! Storage backend traits

use async_trait::async_trait;

use super::cookie::SetCookie;

/// Durable key-value storage (`localStorage` in a browser)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read `key`; `Ok(None)` when unset
    async fn get_item(&self, key: &str) -> Result<Option<String>, crate::Error>;

    /// Write `value` under `key`
    async fn set_item(&self, key: &str, value: &str) -> Result<(), crate::Error>;
}

/// Script-visible cookie jar (`document.cookie`)
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Current cookies as a `name=value; name2=value2` header
    async fn cookie_header(&self) -> Result<String, crate::Error>;

    /// Store (or with `Max-Age=0`, delete) a cookie
    async fn set_cookie(&self, cookie: &SetCookie) -> Result<(), crate::Error>;
}
