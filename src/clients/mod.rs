//! Outbound HTTP plumbing

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

const USER_AGENT: &str = concat!("site-relay/", env!("CARGO_PKG_VERSION"));

/// Build a client whose every request is bounded by `timeout`.
///
/// A timeout surfaces as a `reqwest::Error`, so callers treat it like any other
/// upstream failure.
#[must_use]
pub fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build HTTP client, using defaults: {}", e);
            Client::new()
        })
}
