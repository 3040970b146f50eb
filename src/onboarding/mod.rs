//! # Onboarding submission
//!
//! Sends a computed fingerprint and its raw record to the onboarding API.

pub mod types;
pub mod client;

pub use types::{PreparationRequest, PreparationResponse};
pub use client::OnboardingClient;
