//! Failure-isolated signal collectors
//!
//! Every collector wraps one or more [`SignalSource`] probes and turns any
//! probe error into an absent (or defaulted) value. None of them can fail.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::traits::{CanvasSpec, HighEntropyValues, SignalSource, UaBaseline, HIGH_ENTROPY_HINTS};
use crate::fingerprint::{hash_hex, Hardware, Screen, UserAgentData, WebGlInfo};
use crate::Error;

/// Locale and time zone signals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleSignals {
    pub languages: Vec<String>,
    pub primary_language: Option<String>,
    pub time_zone: Option<String>,
    pub time_zone_offset_minutes: i32,
}

fn absent<T>(signal: &str, err: Error) -> Option<T> {
    if err.is_unavailable() {
        debug!("{} unavailable: {}", signal, err);
    } else {
        warn!("{} probe failed: {}", signal, err);
    }
    None
}

/// Drop repeated entries, keeping the first occurrence of each
pub fn dedup_languages(languages: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    languages
        .into_iter()
        .filter(|lang| seen.insert(lang.clone()))
        .collect()
}

/// `navigator.userAgent`; empty when even that cannot be read
pub async fn collect_user_agent(source: &dyn SignalSource) -> String {
    match source.user_agent().await {
        Ok(user_agent) => user_agent,
        Err(e) => absent::<String>("userAgent", e).unwrap_or_default(),
    }
}

/// Languages, primary language, time zone name and offset
pub async fn collect_locale(source: &dyn SignalSource) -> LocaleSignals {
    let languages = match source.languages().await {
        Ok(languages) => dedup_languages(languages),
        Err(e) => absent::<Vec<String>>("languages", e).unwrap_or_default(),
    };

    let time_zone = match source.time_zone().await {
        Ok(zone) => zone.filter(|z| !z.is_empty()),
        Err(e) => absent("timeZone", e),
    };

    let time_zone_offset_minutes = match source.time_zone_offset_minutes().await {
        Ok(offset) => offset,
        Err(e) => absent::<i32>("timeZoneOffset", e).unwrap_or(0),
    };

    LocaleSignals {
        primary_language: languages.first().cloned(),
        languages,
        time_zone,
        time_zone_offset_minutes,
    }
}

/// Screen width, height and color depth, each defaulting to 0
pub async fn collect_screen(source: &dyn SignalSource) -> Screen {
    let raw = match source.screen().await {
        Ok(raw) => raw.unwrap_or_default(),
        Err(e) => absent("screen", e).unwrap_or_default(),
    };

    Screen {
        width: raw.width.unwrap_or(0),
        height: raw.height.unwrap_or(0),
        color_depth: raw.color_depth.unwrap_or(0),
    }
}

/// Device memory, core count and touch points, each independently optional
pub async fn collect_hardware(source: &dyn SignalSource) -> Hardware {
    match source.hardware().await {
        Ok(hardware) => hardware,
        Err(e) => absent("hardware", e).unwrap_or_default(),
    }
}

/// Baseline user-agent data merged with the high-entropy hints
///
/// Absent when the API is missing or the baseline read fails. A failed
/// high-entropy request keeps the baseline fields.
pub async fn collect_user_agent_data(source: &dyn SignalSource) -> Option<UserAgentData> {
    let baseline: UaBaseline = match source.user_agent_data().await {
        Ok(Some(baseline)) => baseline,
        Ok(None) => return None,
        Err(e) => return absent("userAgentData", e),
    };

    let high = match source.high_entropy_values(HIGH_ENTROPY_HINTS).await {
        Ok(values) => values,
        Err(e) => absent("high-entropy userAgentData", e).unwrap_or_default(),
    };

    Some(merge_user_agent_data(baseline, high))
}

fn merge_user_agent_data(baseline: UaBaseline, high: HighEntropyValues) -> UserAgentData {
    UserAgentData {
        brands: baseline.brands,
        mobile: baseline.mobile,
        platform: baseline.platform,
        architecture: high.architecture,
        bitness: high.bitness,
        model: high.model,
        platform_version: high.platform_version,
        ua_full_version: high.ua_full_version,
    }
}

/// Unmasked GPU vendor and renderer
pub async fn collect_webgl(source: &dyn SignalSource) -> Option<WebGlInfo> {
    match source.webgl().await {
        Ok(info) => info,
        Err(e) => absent("webgl", e),
    }
}

/// Hash of the reference canvas drawing's PNG data URL
pub async fn collect_canvas_hash(source: &dyn SignalSource, spec: &CanvasSpec) -> Option<String> {
    match source.render_canvas(spec).await {
        Ok(Some(data_url)) if data_url.starts_with("data:image/") => Some(hash_hex(&data_url)),
        Ok(Some(other)) => absent(
            "canvas",
            Error::signal_unavailable(format!("not an image data URL: {:.32}", other)),
        ),
        Ok(None) => None,
        Err(e) => absent("canvas", e),
    }
}
