//! Unified error types for Stable-Fingerprint

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Stable-Fingerprint
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket errors
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// CDP protocol errors
    #[error("CDP error: {0}")]
    Cdp(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Script execution failed (an exception was thrown in the page)
    #[error("Script execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// A platform API is missing, blocked or returned something unusable
    #[error("Signal unavailable: {0}")]
    SignalUnavailable(String),

    /// Durable storage or cookie access was refused
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The immediate caller passed an invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rate-limited the request
    #[error("Too many requests (429). Please try again soon.")]
    TooManyRequests,

    /// The server answered with a non-success status
    #[error("Request failed: {status} {body}")]
    RequestFailed { status: u16, body: String },

    /// The server answered with an unexpected payload
    #[error("Invalid response shape from server: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new WebSocket error
    pub fn websocket<S: Into<String>>(msg: S) -> Self {
        Error::WebSocket(msg.into())
    }

    /// Create a new CDP error
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new script execution failed error
    pub fn script_execution_failed<S: Into<String>>(msg: S) -> Self {
        Error::ScriptExecutionFailed(msg.into())
    }

    /// Create a new signal unavailable error
    pub fn signal_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::SignalUnavailable(msg.into())
    }

    /// Create a new storage unavailable error
    pub fn storage_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::StorageUnavailable(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a new invalid response error
    pub fn invalid_response<S: Into<String>>(msg: S) -> Self {
        Error::InvalidResponse(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether the error came from the page or a storage backend refusing
    /// access, as opposed to the transport underneath it.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Error::SignalUnavailable(_) | Error::StorageUnavailable(_) | Error::ScriptExecutionFailed(_)
        )
    }
}
