//! Mock signal source for testing
//!
//! Every probe answer is a public field so tests can switch individual
//! capabilities off (`Ok(None)`) or make them throw (`Err`).

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::traits::*;
use crate::fingerprint::{Brand, Hardware, WebGlInfo};
use crate::Error;

/// Scripted probe answer; `Err` carries the message of the thrown exception
pub type Probe<T> = std::result::Result<T, String>;

/// Canvas rendering behaviour of the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCanvas {
    /// Produce a data URL derived from the requested drawing
    Render,
    /// Return this exact data URL
    Fixed(String),
    /// No 2D context
    Unsupported,
    /// Rendering throws
    Fail(String),
}

/// Mock signal source
#[derive(Debug)]
pub struct MockSignalSource {
    pub user_agent: Probe<String>,
    pub languages: Probe<Vec<String>>,
    pub time_zone: Probe<Option<String>>,
    pub time_zone_offset_minutes: Probe<i32>,
    pub screen: Probe<Option<RawScreen>>,
    pub hardware: Probe<Hardware>,
    pub user_agent_data: Probe<Option<UaBaseline>>,
    pub high_entropy_values: Probe<HighEntropyValues>,
    pub webgl: Probe<Option<WebGlInfo>>,
    pub canvas: MockCanvas,
    requested_hints: Mutex<Vec<String>>,
    probe_count: AtomicUsize,
}

impl MockSignalSource {
    /// Desktop Chromium on Linux with every capability available
    pub fn new() -> Self {
        Self {
            user_agent: Ok("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string()),
            languages: Ok(vec!["en-US".to_string(), "en".to_string()]),
            time_zone: Ok(Some("Europe/Sofia".to_string())),
            time_zone_offset_minutes: Ok(-120),
            screen: Ok(Some(RawScreen {
                width: Some(2560),
                height: Some(1440),
                color_depth: Some(24),
            })),
            hardware: Ok(Hardware {
                device_memory_gb: Some(8.0),
                hardware_concurrency: Some(16),
                max_touch_points: Some(0),
            }),
            user_agent_data: Ok(Some(UaBaseline {
                brands: vec![
                    Brand { brand: "Chromium".to_string(), version: "131".to_string() },
                    Brand { brand: "Not_A Brand".to_string(), version: "24".to_string() },
                ],
                mobile: false,
                platform: "Linux".to_string(),
            })),
            high_entropy_values: Ok(HighEntropyValues {
                architecture: Some("x86".to_string()),
                bitness: Some("64".to_string()),
                model: Some(String::new()),
                platform_version: Some("6.8.0".to_string()),
                ua_full_version: Some("131.0.6778.85".to_string()),
            }),
            webgl: Ok(Some(WebGlInfo {
                vendor: "Google Inc. (Intel)".to_string(),
                renderer: "ANGLE (Intel, Mesa Intel(R) UHD Graphics 630 (CFL GT2), OpenGL 4.6)".to_string(),
            })),
            canvas: MockCanvas::Render,
            requested_hints: Mutex::new(Vec::new()),
            probe_count: AtomicUsize::new(0),
        }
    }

    /// Privacy-hardened browser: every optional API missing or throwing
    pub fn degraded() -> Self {
        Self {
            user_agent: Ok("Mozilla/5.0 (X11; Linux x86_64; rv:132.0) Gecko/20100101 Firefox/132.0".to_string()),
            languages: Ok(vec!["en-US".to_string()]),
            time_zone: Err("RangeError: Intl is disabled".to_string()),
            time_zone_offset_minutes: Ok(0),
            screen: Ok(None),
            hardware: Ok(Hardware::default()),
            user_agent_data: Ok(None),
            high_entropy_values: Err("NotAllowedError".to_string()),
            webgl: Ok(None),
            canvas: MockCanvas::Fail("SecurityError: canvas read blocked".to_string()),
            requested_hints: Mutex::new(Vec::new()),
            probe_count: AtomicUsize::new(0),
        }
    }

    /// Every probe throws
    pub fn failing() -> Self {
        let blocked = || "SecurityError: blocked".to_string();
        Self {
            user_agent: Err(blocked()),
            languages: Err(blocked()),
            time_zone: Err(blocked()),
            time_zone_offset_minutes: Err(blocked()),
            screen: Err(blocked()),
            hardware: Err(blocked()),
            user_agent_data: Err(blocked()),
            high_entropy_values: Err(blocked()),
            webgl: Err(blocked()),
            canvas: MockCanvas::Fail(blocked()),
            requested_hints: Mutex::new(Vec::new()),
            probe_count: AtomicUsize::new(0),
        }
    }

    /// Hints passed to `high_entropy_values`, across all calls
    pub fn requested_hints(&self) -> Vec<String> {
        self.requested_hints
            .lock()
            .map(|hints| hints.clone())
            .unwrap_or_default()
    }

    /// Number of probe calls made so far
    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::Relaxed)
    }

    /// The data URL the mock produces for `spec` in [`MockCanvas::Render`] mode
    pub fn rendered_data_url(spec: &CanvasSpec) -> String {
        let pixels = format!(
            "{}x{}|{}|{}@{},{}|{}|{}|arc {},{} r{} {}..{}",
            spec.width,
            spec.height,
            spec.background,
            spec.text,
            spec.text_x,
            spec.text_y,
            spec.font,
            spec.stroke_color,
            spec.arc_x,
            spec.arc_y,
            spec.arc_radius,
            spec.arc_start,
            spec.arc_end,
        );
        format!("data:image/png;base64,{}", BASE64.encode(pixels.as_bytes()))
    }

    fn answer<T: Clone>(&self, probe: &Probe<T>) -> Result<T, Error> {
        self.probe_count.fetch_add(1, Ordering::Relaxed);
        probe.clone().map_err(Error::script_execution_failed)
    }
}

impl Default for MockSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalSource for MockSignalSource {
    async fn user_agent(&self) -> Result<String, Error> {
        self.answer(&self.user_agent)
    }

    async fn languages(&self) -> Result<Vec<String>, Error> {
        self.answer(&self.languages)
    }

    async fn time_zone(&self) -> Result<Option<String>, Error> {
        self.answer(&self.time_zone)
    }

    async fn time_zone_offset_minutes(&self) -> Result<i32, Error> {
        self.answer(&self.time_zone_offset_minutes)
    }

    async fn screen(&self) -> Result<Option<RawScreen>, Error> {
        self.answer(&self.screen)
    }

    async fn hardware(&self) -> Result<Hardware, Error> {
        self.answer(&self.hardware)
    }

    async fn user_agent_data(&self) -> Result<Option<UaBaseline>, Error> {
        self.answer(&self.user_agent_data)
    }

    async fn high_entropy_values(&self, hints: &[&str]) -> Result<HighEntropyValues, Error> {
        if let Ok(mut requested) = self.requested_hints.lock() {
            requested.extend(hints.iter().map(|h| h.to_string()));
        }
        self.answer(&self.high_entropy_values)
    }

    async fn webgl(&self) -> Result<Option<WebGlInfo>, Error> {
        self.answer(&self.webgl)
    }

    async fn render_canvas(&self, spec: &CanvasSpec) -> Result<Option<String>, Error> {
        self.probe_count.fetch_add(1, Ordering::Relaxed);
        match &self.canvas {
            MockCanvas::Render => Ok(Some(Self::rendered_data_url(spec))),
            MockCanvas::Fixed(url) => Ok(Some(url.clone())),
            MockCanvas::Unsupported => Ok(None),
            MockCanvas::Fail(msg) => Err(Error::script_execution_failed(msg.clone())),
        }
    }
}
