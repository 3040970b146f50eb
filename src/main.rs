//! # stable-fingerprint
//!
//! Attaches to a running Chrome over CDP, computes the device fingerprint of
//! a page and prints `{fingerprint, data}` as JSON. When an API base URL and
//! an app version are configured the result is also submitted to the
//! onboarding endpoint.
//!
//! ## Environment variables
//! - `STABLEFP_CONFIG`: TOML config file; the `STABLEFP_*` variables below are ignored when set
//! - `STABLEFP_CDP_ENDPOINT`: DevTools endpoint (default: ws://localhost:9222)
//! - `STABLEFP_TARGET_URL`: page WebSocket URL (default: first page target)
//! - `STABLEFP_API_BASE_URL`, `STABLEFP_APP_VERSION`: enable submission

use stable_fingerprint::{
    cdp::{CdpBrowser, CdpBrowserImpl, CdpClient},
    config::Config,
    onboarding::OnboardingClient,
    FingerprintEngine,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn load_config() -> stable_fingerprint::Result<Config> {
    match std::env::var("STABLEFP_CONFIG") {
        Ok(path) => Config::from_file(&path),
        Err(_) => Config::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    // RUST_LOG wins over the configured level
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<Level>().ok())
        .or_else(|| config.log_level.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Stable-Fingerprint v{}", stable_fingerprint::VERSION);
    info!("Using CDP endpoint {}", config.cdp_endpoint);

    let browser = CdpBrowserImpl::new(config.cdp_endpoint.clone())
        .with_command_timeout(Duration::from_millis(config.command_timeout_ms));
    let client: Arc<dyn CdpClient> = match &config.target_url {
        Some(target) => browser.create_client(target).await?,
        None => browser.page_client().await?,
    };

    let engine = FingerprintEngine::for_page(client, &config);
    let result = engine.compute().await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    match (&config.api_base_url, &config.app_version) {
        (Some(_), Some(app_version)) => {
            let onboarding = OnboardingClient::from_config(&config)?;
            let preparation = onboarding.prepare(app_version, &result).await?;
            info!(
                "Submitted fingerprint: ok={} visitor={}",
                preparation.ok, preparation.visitor_id
            );
        }
        (Some(_), None) => warn!("api_base_url is set but app_version is not; skipping submission"),
        _ => {}
    }

    Ok(())
}
