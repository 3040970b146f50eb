//! Seams between the fingerprint probes and a DevTools target
//!
//! Probes and page-backed storage only see [`CdpClient`]; the WebSocket
//! transport sits behind [`CdpConnection`] so both can be mocked.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Reply to one protocol command, correlated by `id`
#[derive(Debug, Clone)]
pub struct CdpResponse {
    pub id: u64,
    pub result: Option<Value>,
    pub error: Option<CdpError>,
}

/// Protocol-level failure reported by the browser
#[derive(Debug, Clone)]
pub struct CdpError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

/// Raw command channel to a single target
#[async_trait]
pub trait CdpConnection: Send + Sync + std::fmt::Debug {
    /// Sends `method` and resolves once the matching reply arrives
    async fn send_command(&self, method: &str, params: Value) -> Result<CdpResponse, crate::Error>;

    async fn close(&self) -> Result<(), crate::Error>;

    fn is_active(&self) -> bool;
}

/// Page-level operations the probes are written against
#[async_trait]
pub trait CdpClient: Send + Sync + std::fmt::Debug {
    /// Runs `script` via `Runtime.evaluate`; `await_promise` resolves a returned promise first
    async fn evaluate(&self, script: &str, await_promise: bool) -> Result<EvaluationResult, crate::Error>;

    async fn enable_domain(&self, domain: &str) -> Result<(), crate::Error>;

    /// Untyped escape hatch returning the raw `result` payload
    async fn call_method(&self, method: &str, params: Value) -> Result<Value, crate::Error>;
}

/// Value produced by a page script, returned by value
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    String(String),
    Number(f64),
    Bool(bool),
    /// `null` and `undefined` both land here
    Null,
    /// Objects and arrays
    Object(Value),
}

impl EvaluationResult {
    /// Convert back into the JSON data model
    pub fn into_value(self) -> Value {
        match self {
            EvaluationResult::String(s) => Value::String(s),
            EvaluationResult::Number(n) => {
                // keep integral results integral so they deserialize into integer fields
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    Value::from(n as i64)
                } else {
                    serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
                }
            }
            EvaluationResult::Bool(b) => Value::Bool(b),
            EvaluationResult::Null => Value::Null,
            EvaluationResult::Object(v) => v,
        }
    }
}

/// Target discovery over the DevTools HTTP endpoint
#[async_trait]
pub trait CdpBrowser: Send + Sync + std::fmt::Debug {
    /// Connects to a target's `webSocketDebuggerUrl`
    async fn create_client(&self, target_url: &str) -> Result<Arc<dyn CdpClient>, crate::Error>;

    async fn get_version(&self) -> Result<BrowserVersion, crate::Error>;

    async fn get_targets(&self) -> Result<Vec<TargetInfo>, crate::Error>;
}

/// Subset of `/json/version`
#[derive(Debug, Clone)]
pub struct BrowserVersion {
    pub protocol_version: String,
    pub product: String,
    pub user_agent: String,
}

/// One entry of `/json/list`
#[derive(Debug, Clone)]
pub struct TargetInfo {
    pub target_id: String,
    /// `page`, `service_worker`, `iframe`, ...
    pub target_type: String,
    pub title: String,
    pub url: String,
    /// Absent while another client is attached
    pub web_socket_debugger_url: Option<String>,
}
