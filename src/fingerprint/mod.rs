//! # Fingerprint
//!
//! The signal record, its canonical text form, the SHA-256 digest and the
//! [`FingerprintEngine`] that ties collection and hashing together.
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use stable_fingerprint::fingerprint::FingerprintEngine;
//! use stable_fingerprint::signals::MockSignalSource;
//! use stable_fingerprint::storage::{InstallIdStore, MemoryCookieJar, MemoryStore};
//!
//! # async fn example() -> stable_fingerprint::Result<()> {
//! let ids = InstallIdStore::new(Arc::new(MemoryStore::new()), Arc::new(MemoryCookieJar::new()));
//! let engine = FingerprintEngine::new(Arc::new(MockSignalSource::new()), ids);
//! let result = engine.compute().await?;
//! assert_eq!(result.digest.len(), 64);
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod canonical;
pub mod digest;
pub mod engine;


pub use types::{
    Brand, FingerprintData, FingerprintResult, Hardware, Screen, UserAgentData, WebGlInfo,
};
pub use canonical::{canonicalize, format_number, Node, CYCLE_SENTINEL};
pub use digest::{hash_canonical, hash_hex, is_digest, DIGEST_HEX_LEN};
pub use engine::{canonical_text, digest_of, FingerprintEngine};
