//! Tests for signal collectors and the CDP-backed source

use std::sync::Arc;

use crate::cdp::{EvaluationResult, MockCdpClient};
use crate::fingerprint::{hash_hex, Hardware, Screen};
use crate::signals::*;
use serde_json::json;

#[test]
fn test_dedup_languages_keeps_first_occurrence() {
    let languages = vec!["en-US".to_string(), "en-US".to_string(), "bg".to_string()];
    assert_eq!(dedup_languages(languages), vec!["en-US".to_string(), "bg".to_string()]);
}

#[tokio::test]
async fn test_collect_locale_dedups_and_derives_primary() {
    let mut source = MockSignalSource::new();
    source.languages = Ok(vec!["en-US".into(), "en-US".into(), "bg".into()]);

    let locale = collect_locale(&source).await;
    assert_eq!(locale.languages, vec!["en-US", "bg"]);
    assert_eq!(locale.primary_language.as_deref(), Some("en-US"));
    assert_eq!(locale.time_zone.as_deref(), Some("Europe/Sofia"));
    assert_eq!(locale.time_zone_offset_minutes, -120);
}

#[tokio::test]
async fn test_collect_locale_without_languages() {
    let mut source = MockSignalSource::new();
    source.languages = Ok(vec![]);
    source.time_zone = Ok(Some(String::new()));

    let locale = collect_locale(&source).await;
    assert!(locale.languages.is_empty());
    assert_eq!(locale.primary_language, None);
    assert_eq!(locale.time_zone, None);
}

#[tokio::test]
async fn test_collect_screen_defaults_to_zero() {
    let mut source = MockSignalSource::new();
    source.screen = Ok(Some(RawScreen {
        width: Some(1920),
        height: None,
        color_depth: Some(24),
    }));
    assert_eq!(
        collect_screen(&source).await,
        Screen { width: 1920, height: 0, color_depth: 24 }
    );

    source.screen = Ok(None);
    assert_eq!(collect_screen(&source).await, Screen::default());

    source.screen = Err("SecurityError".to_string());
    assert_eq!(collect_screen(&source).await, Screen::default());
}

#[tokio::test]
async fn test_collect_hardware_fields_independent() {
    let mut source = MockSignalSource::new();
    source.hardware = Ok(Hardware {
        device_memory_gb: None,
        hardware_concurrency: Some(4),
        max_touch_points: Some(5),
    });

    let hardware = collect_hardware(&source).await;
    assert_eq!(hardware.device_memory_gb, None);
    assert_eq!(hardware.hardware_concurrency, Some(4));
    assert_eq!(hardware.max_touch_points, Some(5));

    source.hardware = Err("blocked".to_string());
    assert_eq!(collect_hardware(&source).await, Hardware::default());
}

#[tokio::test]
async fn test_user_agent_data_requests_fixed_hints() {
    let source = MockSignalSource::new();
    let data = collect_user_agent_data(&source).await.expect("ua data");

    assert_eq!(
        source.requested_hints(),
        vec!["architecture", "bitness", "model", "platformVersion", "uaFullVersion"]
    );
    assert_eq!(data.platform, "Linux");
    assert_eq!(data.brands.len(), 2);
    assert_eq!(data.architecture.as_deref(), Some("x86"));
    assert_eq!(data.ua_full_version.as_deref(), Some("131.0.6778.85"));
}

#[tokio::test]
async fn test_user_agent_data_keeps_baseline_when_high_entropy_fails() {
    let mut source = MockSignalSource::new();
    source.high_entropy_values = Err("NotAllowedError".to_string());

    let data = collect_user_agent_data(&source).await.expect("baseline kept");
    assert_eq!(data.platform, "Linux");
    assert!(!data.mobile);
    assert_eq!(data.architecture, None);
    assert_eq!(data.bitness, None);
    assert_eq!(data.platform_version, None);

    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value, json!({
        "brands": [
            {"brand": "Chromium", "version": "131"},
            {"brand": "Not_A Brand", "version": "24"}
        ],
        "mobile": false,
        "platform": "Linux"
    }));
}

#[tokio::test]
async fn test_user_agent_data_absent() {
    let mut source = MockSignalSource::new();
    source.user_agent_data = Ok(None);
    assert_eq!(collect_user_agent_data(&source).await, None);
    assert!(source.requested_hints().is_empty());

    source.user_agent_data = Err("TypeError".to_string());
    assert_eq!(collect_user_agent_data(&source).await, None);
}

#[tokio::test]
async fn test_canvas_hash() {
    let mut source = MockSignalSource::new();
    let expected = hash_hex(&MockSignalSource::rendered_data_url(&STABLE_CANVAS));
    assert_eq!(collect_canvas_hash(&source, &STABLE_CANVAS).await, Some(expected));

    source.canvas = MockCanvas::Fixed("data:,".to_string());
    assert_eq!(collect_canvas_hash(&source, &STABLE_CANVAS).await, None);

    source.canvas = MockCanvas::Unsupported;
    assert_eq!(collect_canvas_hash(&source, &STABLE_CANVAS).await, None);

    source.canvas = MockCanvas::Fail("SecurityError".to_string());
    assert_eq!(collect_canvas_hash(&source, &STABLE_CANVAS).await, None);
}

#[tokio::test]
async fn test_canvas_hash_depends_on_drawing() {
    let source = MockSignalSource::new();
    let other = CanvasSpec {
        text: "another-drawing",
        ..STABLE_CANVAS
    };

    let a = collect_canvas_hash(&source, &STABLE_CANVAS).await;
    let b = collect_canvas_hash(&source, &other).await;
    assert!(a.is_some() && b.is_some());
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_failing_source_yields_defaults() {
    let source = MockSignalSource::failing();

    assert_eq!(collect_user_agent(&source).await, "");
    let locale = collect_locale(&source).await;
    assert!(locale.languages.is_empty());
    assert_eq!(locale.time_zone, None);
    assert_eq!(locale.time_zone_offset_minutes, 0);
    assert_eq!(collect_screen(&source).await, Screen::default());
    assert_eq!(collect_hardware(&source).await, Hardware::default());
    assert_eq!(collect_user_agent_data(&source).await, None);
    assert_eq!(collect_webgl(&source).await, None);
    assert_eq!(collect_canvas_hash(&source, &STABLE_CANVAS).await, None);
}

fn scripted_page() -> MockCdpClient {
    MockCdpClient::new()
        .on("navigator.userAgent", EvaluationResult::String("TestAgent/1.0".into()))
        .on("navigator.languages", EvaluationResult::Object(json!(["bg", "en"])))
        .on("resolvedOptions", EvaluationResult::String("Europe/Sofia".into()))
        .on("getTimezoneOffset", EvaluationResult::Number(-180.0))
        .on("window.screen", EvaluationResult::Object(json!({"width": 1366, "height": 768, "colorDepth": 24})))
        .on("navigator.deviceMemory", EvaluationResult::Object(json!({
            "deviceMemoryGB": 4, "hardwareConcurrency": 8, "maxTouchPoints": null
        })))
        .on("typeof d.getHighEntropyValues", EvaluationResult::Object(json!({
            "brands": [{"brand": "Chromium", "version": "131"}], "mobile": false, "platform": "Linux"
        })))
        .on("getHighEntropyValues(hints)", EvaluationResult::Object(json!({
            "architecture": "arm", "bitness": "64"
        })))
        .on("WEBGL_debug_renderer_info", EvaluationResult::Null)
        .on("toDataURL", EvaluationResult::String("data:image/png;base64,AAAA".into()))
}

#[tokio::test]
async fn test_cdp_source_decodes_probe_results() {
    let client = Arc::new(scripted_page());
    let source = CdpSignalSource::new(client.clone());

    assert_eq!(collect_user_agent(&source).await, "TestAgent/1.0");

    let locale = collect_locale(&source).await;
    assert_eq!(locale.languages, vec!["bg", "en"]);
    assert_eq!(locale.time_zone.as_deref(), Some("Europe/Sofia"));
    assert_eq!(locale.time_zone_offset_minutes, -180);

    assert_eq!(
        collect_screen(&source).await,
        Screen { width: 1366, height: 768, color_depth: 24 }
    );

    let hardware = collect_hardware(&source).await;
    assert_eq!(hardware.device_memory_gb, Some(4.0));
    assert_eq!(hardware.hardware_concurrency, Some(8));
    assert_eq!(hardware.max_touch_points, None);

    let ua = collect_user_agent_data(&source).await.expect("ua data");
    assert_eq!(ua.architecture.as_deref(), Some("arm"));
    assert_eq!(ua.model, None);

    assert_eq!(collect_webgl(&source).await, None);
    assert_eq!(
        collect_canvas_hash(&source, &STABLE_CANVAS).await,
        Some(hash_hex("data:image/png;base64,AAAA"))
    );

    // only the high-entropy request awaits a promise
    let awaited = client.awaited();
    assert_eq!(awaited.len(), 1);
    assert!(awaited[0].contains("getHighEntropyValues"));
}

#[tokio::test]
async fn test_cdp_source_thrown_probe_is_absent() {
    let client = Arc::new(
        scripted_page()
            .on_throw("resolvedOptions", "RangeError: invalid time zone")
            .on_throw("toDataURL", "SecurityError: tainted canvas"),
    );
    let source = CdpSignalSource::new(client);

    assert_eq!(collect_locale(&source).await.time_zone, None);
    assert_eq!(collect_canvas_hash(&source, &STABLE_CANVAS).await, None);
}

#[tokio::test]
async fn test_cdp_source_unexpected_shape_is_unavailable() {
    let client = Arc::new(
        scripted_page().on("window.screen", EvaluationResult::String("not a screen".into())),
    );
    let source = CdpSignalSource::new(client);

    let err = source.screen().await.unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(collect_screen(&source).await, Screen::default());
}
