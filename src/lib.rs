//! Stable-Fingerprint: deterministic device fingerprints over the Chrome DevTools Protocol
//!
//! Collects browser and device signals from a live page, combines them with
//! a durable per-install identifier and reduces the record to a SHA-256
//! digest that stays the same for a returning browser profile.

pub mod error;
pub mod config;

pub mod cdp;
pub mod signals;
pub mod storage;
pub mod fingerprint;
pub mod onboarding;

// Re-exports
pub use error::{Error, Result};
pub use fingerprint::{FingerprintData, FingerprintEngine, FingerprintResult};

/// Stable-Fingerprint library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
