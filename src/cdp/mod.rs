//! # Chrome DevTools Protocol (CDP) layer
//!
//! Reaches the browser the fingerprint is taken from. Every signal probe and
//! storage access is a JavaScript expression evaluated in a page target.
//!
//! ## Module structure
//! - `traits`: connection, client and browser interfaces
//! - `types`: CDP wire types
//! - `connection`: WebSocket connection with request/response correlation
//! - `client`: `Runtime.evaluate` wrapper returning typed results
//! - `browser`: target discovery over the DevTools HTTP endpoint
//! - `mock`: mock implementations for testing
//!
//! ## Usage
//! ```rust,no_run
//! use stable_fingerprint::cdp::{CdpBrowserImpl, CdpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let browser = CdpBrowserImpl::new("ws://localhost:9222");
//! let client = browser.page_client().await?;
//! let user_agent = client.evaluate("navigator.userAgent", false).await?;
//! println!("{:?}", user_agent);
//! # Ok(())
//! # }
//! ```

pub mod traits;
pub mod types;
pub mod connection;
pub mod client;
pub mod browser;
pub mod mock;

pub use traits::{
    CdpConnection, CdpClient, CdpBrowser, CdpResponse, CdpError,
    EvaluationResult, BrowserVersion, TargetInfo,
};

// Re-export implementation structs
pub use connection::CdpWebSocketConnection;
pub use client::CdpClientImpl;
pub use browser::CdpBrowserImpl;

// Re-export mock for development/testing
pub use mock::{MockCdpClient, MockCdpConnection, MockEvaluation};
