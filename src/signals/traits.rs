//! Signal source traits
//!
//! This module defines the capability-query interface the collectors probe.
//! Each method maps to one platform API. `Err` means the probe threw or was
//! blocked; `Ok(None)` means the API does not exist on this platform.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fingerprint::{Brand, Hardware, WebGlInfo};

/// High-entropy user-agent hints requested from the platform, in request order
pub const HIGH_ENTROPY_HINTS: &[&str] = &[
    "architecture",
    "bitness",
    "model",
    "platformVersion",
    "uaFullVersion",
];

/// Platform capability probes
#[async_trait]
pub trait SignalSource: Send + Sync + std::fmt::Debug {
    /// `navigator.userAgent`
    async fn user_agent(&self) -> Result<String, crate::Error>;

    /// Reported locale list, falling back to the single primary language.
    /// May contain duplicates.
    async fn languages(&self) -> Result<Vec<String>, crate::Error>;

    /// IANA zone name from the platform's locale resolution
    async fn time_zone(&self) -> Result<Option<String>, crate::Error>;

    /// Current offset from local time to UTC in minutes
    async fn time_zone_offset_minutes(&self) -> Result<i32, crate::Error>;

    /// Physical screen geometry; `None` when there is no screen object
    async fn screen(&self) -> Result<Option<RawScreen>, crate::Error>;

    /// Device memory, logical cores and touch points
    async fn hardware(&self) -> Result<Hardware, crate::Error>;

    /// Low-entropy user-agent data; `None` when the high-entropy API is missing
    async fn user_agent_data(&self) -> Result<Option<UaBaseline>, crate::Error>;

    /// Request the given high-entropy hints. Suspends on the platform.
    async fn high_entropy_values(&self, hints: &[&str]) -> Result<HighEntropyValues, crate::Error>;

    /// Unmasked vendor/renderer; `None` without a 3D context or debug extension
    async fn webgl(&self) -> Result<Option<WebGlInfo>, crate::Error>;

    /// Draw `spec` on an offscreen canvas and return its PNG data URL;
    /// `None` without a 2D context
    async fn render_canvas(&self, spec: &CanvasSpec) -> Result<Option<String>, crate::Error>;
}

/// Screen values as reported; each may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScreen {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color_depth: Option<u32>,
}

/// Synchronously readable user-agent data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UaBaseline {
    pub brands: Vec<Brand>,
    pub mobile: bool,
    pub platform: String,
}

/// Values returned for the high-entropy hints; unreturned hints are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighEntropyValues {
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub bitness: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub platform_version: Option<String>,
    #[serde(default)]
    pub ua_full_version: Option<String>,
}

/// The reference drawing hashed by the canvas collector
///
/// Every value is fixed; changing any of them changes every canvas hash.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub background: &'static str,
    pub text: &'static str,
    pub font: &'static str,
    pub text_color: &'static str,
    pub text_x: f64,
    pub text_y: f64,
    pub stroke_color: &'static str,
    pub arc_x: f64,
    pub arc_y: f64,
    pub arc_radius: f64,
    pub arc_start: f64,
    pub arc_end: f64,
}

/// Drawing used for every canvas hash
pub const STABLE_CANVAS: CanvasSpec = CanvasSpec {
    width: 256,
    height: 128,
    background: "#ccc",
    text: "stable-canvas-v1",
    font: "16px Arial",
    text_color: "#111",
    text_x: 10.0,
    text_y: 24.0,
    stroke_color: "#333",
    arc_x: 120.0,
    arc_y: 64.0,
    arc_radius: 40.0,
    arc_start: 0.1,
    arc_end: std::f64::consts::PI * 1.7,
};

impl Default for CanvasSpec {
    fn default() -> Self {
        STABLE_CANVAS
    }
}
