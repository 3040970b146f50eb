//! Fingerprint record types
//!
//! Field names serialize in camelCase, which is also the layout that gets
//! canonicalized and hashed. Absent optional fields serialize as `null`
//! (the key stays in the record); absent high-entropy user-agent fields are
//! left out of `userAgentData` entirely.

use serde::{Deserialize, Serialize};

/// Raw signal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintData {
    /// Browser-reported identification string
    pub user_agent: String,
    /// Structured user-agent data, when the platform exposes it
    pub user_agent_data: Option<UserAgentData>,
    /// First entry of `languages`
    pub primary_language: Option<String>,
    /// Locale preferences, deduplicated, in reported order
    pub languages: Vec<String>,
    /// IANA zone name
    pub time_zone: Option<String>,
    /// Minutes to add to local time to reach UTC (e.g. -120 for UTC+2)
    pub time_zone_offset_minutes: i32,
    pub screen: Screen,
    pub hardware: Hardware,
    pub webgl: Option<WebGlInfo>,
    /// SHA-256 hex of the reference canvas drawing
    pub canvas_hash: Option<String>,
    /// Durable per-install identifier
    pub install_id: String,
}

/// Extended user-agent data (brands, platform and high-entropy hints)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgentData {
    pub brands: Vec<Brand>,
    pub mobile: bool,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ua_full_version: Option<String>,
}

/// A brand/version pair from `navigator.userAgentData.brands`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub brand: String,
    pub version: String,
}

/// Physical screen geometry; unavailable values are 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
}

/// Hardware hints, each present only where the platform reports it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hardware {
    /// Approximate device memory; fractional on low-memory devices
    #[serde(rename = "deviceMemoryGB")]
    pub device_memory_gb: Option<f64>,
    pub hardware_concurrency: Option<u32>,
    pub max_touch_points: Option<u32>,
}

/// Unmasked GPU vendor and renderer strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebGlInfo {
    pub vendor: String,
    pub renderer: String,
}

/// Digest plus the record it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintResult {
    /// 64-character lowercase SHA-256 hex of the canonical record
    #[serde(rename = "fingerprint")]
    pub digest: String,
    pub data: FingerprintData,
}
