//! Page storage reached over CDP

use async_trait::async_trait;
use std::sync::Arc;

use super::cookie::SetCookie;
use super::traits::{CookieJar, KeyValueStore};
use crate::cdp::{CdpClient, EvaluationResult};
use crate::signals::scripts::js_string;
use crate::Error;

/// Exceptions thrown by the page mean the storage API refused access
fn refused(e: Error) -> Error {
    match e {
        Error::ScriptExecutionFailed(msg) => Error::StorageUnavailable(msg),
        other => other,
    }
}

/// `window.localStorage` of the attached page
#[derive(Debug, Clone)]
pub struct CdpLocalStorage {
    client: Arc<dyn CdpClient>,
}

impl CdpLocalStorage {
    pub fn new(client: Arc<dyn CdpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValueStore for CdpLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let script = format!("window.localStorage.getItem({})", js_string(key));
        match self.client.evaluate(&script, false).await.map_err(refused)? {
            EvaluationResult::String(value) => Ok(Some(value)),
            EvaluationResult::Null => Ok(None),
            other => Err(Error::storage_unavailable(format!("unexpected getItem result: {:?}", other))),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let script = format!(
            "window.localStorage.setItem({}, {})",
            js_string(key),
            js_string(value)
        );
        self.client.evaluate(&script, false).await.map_err(refused)?;
        Ok(())
    }
}

/// `document.cookie` of the attached page
#[derive(Debug, Clone)]
pub struct CdpCookieJar {
    client: Arc<dyn CdpClient>,
}

impl CdpCookieJar {
    pub fn new(client: Arc<dyn CdpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CookieJar for CdpCookieJar {
    async fn cookie_header(&self) -> Result<String, Error> {
        match self.client.evaluate("document.cookie", false).await.map_err(refused)? {
            EvaluationResult::String(header) => Ok(header),
            EvaluationResult::Null => Ok(String::new()),
            other => Err(Error::storage_unavailable(format!("unexpected cookie header: {:?}", other))),
        }
    }

    async fn set_cookie(&self, cookie: &SetCookie) -> Result<(), Error> {
        let script = format!("document.cookie = {}", js_string(&cookie.to_string()));
        self.client.evaluate(&script, false).await.map_err(refused)?;
        Ok(())
    }
}
