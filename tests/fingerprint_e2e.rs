//! End-to-end fingerprint tests
//!
//! Run the full CDP stack (WebSocket connection, client, probes and page
//! storage) against the mock Chrome server.

mod common;

use common::{assert_uuid_v4, connect_page, test_config};
use mock_chrome::{MockChromeServer, MOCK_CANVAS_DATA_URL, MOCK_USER_AGENT};
use serde_json::json;
use stable_fingerprint::cdp::{CdpBrowser, CdpBrowserImpl};
use stable_fingerprint::fingerprint::{digest_of, hash_hex, is_digest, Screen};
use stable_fingerprint::storage::{CdpCookieJar, CdpLocalStorage, CookieJar, KeyValueStore};
use stable_fingerprint::FingerprintEngine;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test 1: full computation over a live connection
#[tokio::test]
async fn test_compute_over_cdp() {
    let server = MockChromeServer::start().await.unwrap();
    let config = test_config(server.ws_endpoint());
    let client = connect_page(server.ws_endpoint()).await.unwrap();

    let result = FingerprintEngine::for_page(client, &config).compute().await.unwrap();
    let data = &result.data;

    assert!(is_digest(&result.digest));
    assert_eq!(result.digest, digest_of(data).unwrap());
    assert_eq!(data.user_agent, MOCK_USER_AGENT);
    assert_eq!(data.languages, vec!["en-US", "bg"]);
    assert_eq!(data.primary_language.as_deref(), Some("en-US"));
    assert_eq!(data.time_zone.as_deref(), Some("Europe/Sofia"));
    assert_eq!(data.time_zone_offset_minutes, -120);
    assert_eq!(data.screen, Screen { width: 1920, height: 1080, color_depth: 24 });
    assert_eq!(data.hardware.device_memory_gb, Some(8.0));
    assert_eq!(data.hardware.hardware_concurrency, Some(12));
    assert_eq!(data.hardware.max_touch_points, Some(0));

    let ua = data.user_agent_data.as_ref().expect("user agent data");
    assert_eq!(ua.brands.len(), 3);
    assert_eq!(ua.platform, "Linux");
    assert_eq!(ua.model.as_deref(), Some(""));
    assert_eq!(ua.ua_full_version.as_deref(), Some("131.0.6778.85"));

    assert_eq!(data.webgl.as_ref().map(|w| w.vendor.as_str()), Some("Google Inc. (Intel)"));
    assert_eq!(data.canvas_hash, Some(hash_hex(MOCK_CANVAS_DATA_URL)));

    assert_uuid_v4(&data.install_id);
    assert_eq!(server.local_storage("install_id").as_ref(), Some(&data.install_id));
    assert_eq!(server.cookie("install_id").as_ref(), Some(&data.install_id));
    assert_eq!(
        server.cookie_assignments(),
        vec![format!(
            "install_id={}; Max-Age=34560000; Path=/; SameSite=Lax",
            data.install_id
        )]
    );
}

/// Test 2: a second session on the same profile reproduces the digest
#[tokio::test]
async fn test_digest_stable_across_sessions() {
    let server = MockChromeServer::start().await.unwrap();
    let config = test_config(server.ws_endpoint());

    let first_client = connect_page(server.ws_endpoint()).await.unwrap();
    let first = FingerprintEngine::for_page(first_client, &config).compute().await.unwrap();

    let second_client = connect_page(server.ws_endpoint()).await.unwrap();
    let second = FingerprintEngine::for_page(second_client, &config).compute().await.unwrap();

    assert_eq!(first.data.install_id, second.data.install_id);
    assert_eq!(first.digest, second.digest);
    assert_eq!(server.cookie_assignments().len(), 1);
}

/// Test 3: cleared local storage is restored from the cookie
#[tokio::test]
async fn test_install_id_restored_from_cookie() {
    let server = MockChromeServer::start().await.unwrap();
    let config = test_config(server.ws_endpoint());
    let client = connect_page(server.ws_endpoint()).await.unwrap();
    let engine = FingerprintEngine::for_page(client, &config);

    let first = engine.compute().await.unwrap();
    server.clear_local_storage();
    let second = engine.compute().await.unwrap();

    assert_eq!(first.data.install_id, second.data.install_id);
    assert_eq!(server.local_storage("install_id").as_ref(), Some(&first.data.install_id));
}

/// Test 4: blocked storage still yields a valid fingerprint
#[tokio::test]
async fn test_blocked_storage_degrades() {
    let server = MockChromeServer::start().await.unwrap();
    server.block_storage(true);
    let config = test_config(server.ws_endpoint());
    let client = connect_page(server.ws_endpoint()).await.unwrap();
    let engine = FingerprintEngine::for_page(client, &config);

    let first = engine.compute().await.unwrap();
    let second = engine.compute().await.unwrap();

    assert_uuid_v4(&first.data.install_id);
    assert_uuid_v4(&second.data.install_id);
    assert_ne!(first.data.install_id, second.data.install_id);
    assert!(server.local_storage("install_id").is_none());
    assert!(server.cookie_assignments().is_empty());
}

/// Test 5: throwing and missing platform APIs leave fields absent
#[tokio::test]
async fn test_privacy_hardened_page() {
    let server = MockChromeServer::start().await.unwrap();
    server.throw_on("resolvedOptions", "RangeError: Incorrect locale information provided");
    server.set_probe("window.screen", json!(null));
    server.set_probe("navigator.deviceMemory", json!({
        "deviceMemoryGB": null, "hardwareConcurrency": 2, "maxTouchPoints": null
    }));
    server.set_probe("typeof d.getHighEntropyValues", json!(null));
    server.set_probe("WEBGL_debug_renderer_info", json!(null));
    server.throw_on("toDataURL", "SecurityError: The operation is insecure.");

    let config = test_config(server.ws_endpoint());
    let client = connect_page(server.ws_endpoint()).await.unwrap();
    let result = FingerprintEngine::for_page(client, &config).compute().await.unwrap();
    let data = &result.data;

    assert!(is_digest(&result.digest));
    assert_eq!(data.user_agent, MOCK_USER_AGENT);
    assert_eq!(data.languages, vec!["en-US", "bg"]);
    assert_eq!(data.time_zone, None);
    assert_eq!(data.time_zone_offset_minutes, -120);
    assert_eq!(data.screen, Screen::default());
    assert_eq!(data.hardware.device_memory_gb, None);
    assert_eq!(data.hardware.hardware_concurrency, Some(2));
    assert_eq!(data.user_agent_data, None);
    assert_eq!(data.webgl, None);
    assert_eq!(data.canvas_hash, None);
    assert_uuid_v4(&data.install_id);

    // without the high-entropy API no hint request is made
    assert!(!server
        .evaluations()
        .iter()
        .any(|e| e.contains("getHighEntropyValues(hints)")));
}

/// Test 6: high-entropy rejection keeps the baseline user-agent data
#[tokio::test]
async fn test_high_entropy_rejection_keeps_baseline() {
    let server = MockChromeServer::start().await.unwrap();
    server.throw_on("getHighEntropyValues(hints)", "NotAllowedError: permission denied");

    let config = test_config(server.ws_endpoint());
    let client = connect_page(server.ws_endpoint()).await.unwrap();
    let result = FingerprintEngine::for_page(client, &config).compute().await.unwrap();

    let ua = result.data.user_agent_data.expect("baseline kept");
    assert_eq!(ua.platform, "Linux");
    assert_eq!(ua.architecture, None);
    assert_eq!(ua.ua_full_version, None);
}

/// Test 7: page storage backends round-trip through the page
#[tokio::test]
async fn test_page_storage_backends() {
    let server = MockChromeServer::start().await.unwrap();
    let client = connect_page(server.ws_endpoint()).await.unwrap();

    let storage = CdpLocalStorage::new(client.clone());
    assert_eq!(storage.get_item("install_id").await.unwrap(), None);
    storage.set_item("install_id", "abc").await.unwrap();
    assert_eq!(storage.get_item("install_id").await.unwrap().as_deref(), Some("abc"));

    let jar = CdpCookieJar::new(client);
    assert_eq!(jar.cookie_header().await.unwrap(), "");
    jar.set_cookie(&stable_fingerprint::storage::SetCookie::new("theme", "dark", 60))
        .await
        .unwrap();
    assert_eq!(jar.cookie_header().await.unwrap(), "theme=dark");
}

/// Test 8: target discovery attaches to the page target
#[tokio::test]
async fn test_page_client_discovery() {
    let server = MockChromeServer::start().await.unwrap();
    let devtools = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(server.targets()))
        .mount(&devtools)
        .await;
    Mock::given(method("GET"))
        .and(path("/json/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockChromeServer::version_info()))
        .mount(&devtools)
        .await;

    let browser = CdpBrowserImpl::new(devtools.uri());
    let version = browser.get_version().await.unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert_eq!(version.product, "Chrome/131.0.6778.85");

    let targets = browser.get_targets().await.unwrap();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[1].target_type, "page");

    let client = browser.page_client().await.unwrap();
    let config = test_config(&devtools.uri());
    let result = FingerprintEngine::for_page(client, &config).compute().await.unwrap();
    assert_eq!(result.data.user_agent, MOCK_USER_AGENT);
}

/// Test 9: no page target is an error
#[tokio::test]
async fn test_page_client_without_page_target() {
    let devtools = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&devtools)
        .await;

    let browser = CdpBrowserImpl::new(devtools.uri());
    let result = browser.page_client().await;
    assert!(matches!(result, Err(stable_fingerprint::Error::Cdp(_))));
}

/// Test 10: custom storage key and cookie lifetime from configuration
#[tokio::test]
async fn test_configured_storage_key() {
    let server = MockChromeServer::start().await.unwrap();
    let mut config = test_config(server.ws_endpoint());
    config.storage_key = "device_id".to_string();
    config.cookie_max_age_secs = 3600;
    let client = connect_page(server.ws_endpoint()).await.unwrap();

    let result = FingerprintEngine::for_page(client, &config).compute().await.unwrap();
    assert_eq!(server.local_storage("device_id").as_ref(), Some(&result.data.install_id));
    assert!(server.local_storage("install_id").is_none());
    assert_eq!(
        server.cookie_assignments(),
        vec![format!("device_id={}; Max-Age=3600; Path=/; SameSite=Lax", result.data.install_id)]
    );
}
