//! Cloudflare Turnstile challenge verification

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::RelayError;

/// Confirms that a client-supplied challenge token came from a human.
#[async_trait]
pub trait ChallengeVerifier: Send + Sync {
    /// `Ok(false)` means the service rejected the token. Transport and decoding
    /// problems are errors.
    async fn verify(&self, token: &str) -> Result<bool, RelayError>;
}

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

pub struct TurnstileVerifier {
    http: HttpClient,
    secret: String,
    verify_url: String,
}

impl TurnstileVerifier {
    #[must_use]
    pub fn new(http: HttpClient, secret: String, verify_url: String) -> Self {
        Self {
            http,
            secret,
            verify_url,
        }
    }
}

#[async_trait]
impl ChallengeVerifier for TurnstileVerifier {
    async fn verify(&self, token: &str) -> Result<bool, RelayError> {
        let form = [("secret", self.secret.as_str()), ("response", token)];

        let resp = self.http.post(&self.verify_url).form(&form).send().await?;
        let status = resp.status();
        let body: SiteVerifyResponse = resp.json().await.map_err(|e| {
            RelayError::ParseError(format!("siteverify response ({status}): {e}"))
        })?;

        if body.success {
            info!("Turnstile token accepted");
        } else {
            warn!(error_codes = ?body.error_codes, "Turnstile token rejected");
        }
        Ok(body.success)
    }
}
