//! # Signal collection
//!
//! Reads device and browser signals through a [`SignalSource`]. Each
//! collector isolates its own failures: a missing or blocked platform API
//! lowers the entropy of the record but never aborts the computation.
//!
//! ## Module structure
//! - `traits`: the [`SignalSource`] capability interface and probe types
//! - `collectors`: failure-isolated collectors, one per signal category
//! - `scripts`: JavaScript probes evaluated in the page
//! - `cdp`: [`SignalSource`] over a CDP client
//! - `mock`: scripted source for testing

pub mod traits;
pub mod collectors;
pub mod scripts;
pub mod cdp;
pub mod mock;

#[cfg(test)]
pub mod tests;

pub use traits::{
    SignalSource, RawScreen, UaBaseline, HighEntropyValues, CanvasSpec,
    HIGH_ENTROPY_HINTS, STABLE_CANVAS,
};
pub use collectors::{
    collect_canvas_hash, collect_hardware, collect_locale, collect_screen,
    collect_user_agent, collect_user_agent_data, collect_webgl, dedup_languages,
    LocaleSignals,
};
pub use cdp::CdpSignalSource;
pub use mock::{MockCanvas, MockSignalSource};
