//! Onboarding API payloads

use serde::{Deserialize, Serialize};

use crate::fingerprint::FingerprintData;

/// Body of `POST /onboarding/preparation`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationRequest<'a> {
    pub app_version: &'a str,
    pub fingerprint: &'a str,
    /// The raw record the digest was computed from
    pub extra_data: &'a FingerprintData,
}

/// Server answer; both fields are required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparationResponse {
    pub ok: bool,
    pub visitor_id: String,
}
