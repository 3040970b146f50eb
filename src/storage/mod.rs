//! # Install-id storage
//!
//! Two independent backends hold the per-install identifier: durable
//! key-value storage and a script-visible cookie.
//!
//! ## Module structure
//! - `traits`: [`KeyValueStore`] and [`CookieJar`]
//! - `cookie`: cookie assignment rendering and header parsing
//! - `memory`: in-memory backends with simulated access restrictions
//! - `cdp`: `localStorage` and `document.cookie` of a live page
//! - `install_id`: the [`InstallIdStore`] lifecycle

pub mod traits;
pub mod cookie;
pub mod memory;
pub mod cdp;
pub mod install_id;


/// Storage key and cookie name of the install id
pub const INSTALL_ID_KEY: &str = "install_id";

/// Cookie lifetime: 400 days
pub const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 400;

pub use traits::{CookieJar, KeyValueStore};
pub use cookie::{read_cookie, SameSite, SetCookie};
pub use memory::{MemoryCookieJar, MemoryStore, StoreAccess};
pub use cdp::{CdpCookieJar, CdpLocalStorage};
pub use install_id::InstallIdStore;
