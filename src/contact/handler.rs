//! Contact Lambda handler.
//!
//! Steps, in order, each terminal on failure:
//! - method check (POST only)
//! - body decoding and field extraction
//! - required fields, then length ceilings
//! - Turnstile verification, when a secret is configured
//! - Resend relay, when an API key is configured

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::mailer::{MailRelay, ResendMailer, compose_email};
use super::submission::parse_submission;
use super::turnstile::{ChallengeVerifier, TurnstileVerifier};
use crate::api::helpers;
use crate::api::parsing::InboundRequest;
use crate::clients::http_client;
use crate::core::config::ContactConfig;
use crate::errors::RelayError;

pub use self::function_handler as handler;

pub const SUCCESS_MESSAGE: &str = "Message sent";

pub struct ContactService {
    verifier: Option<Box<dyn ChallengeVerifier>>,
    mailer: Option<Box<dyn MailRelay>>,
    mail_from: String,
    mail_to: Vec<String>,
}

impl ContactService {
    /// A service with verification and relay both switched off.
    #[must_use]
    pub fn new(mail_from: String, mail_to: Vec<String>) -> Self {
        Self {
            verifier: None,
            mailer: None,
            mail_from,
            mail_to,
        }
    }

    /// Wire up whichever upstreams have credentials configured.
    #[must_use]
    pub fn from_config(config: &ContactConfig) -> Self {
        let http = http_client(config.upstream_timeout);
        let mut service = Self::new(config.mail_from.clone(), config.mail_to.clone());

        if let Some(secret) = &config.turnstile_secret {
            service = service.with_verifier(TurnstileVerifier::new(
                http.clone(),
                secret.clone(),
                config.turnstile_verify_url.clone(),
            ));
        }
        if let Some(api_key) = &config.resend_api_key {
            service = service.with_mailer(ResendMailer::new(
                http,
                api_key.clone(),
                config.resend_api_url.clone(),
            ));
        }
        service
    }

    #[must_use]
    pub fn with_verifier(mut self, verifier: impl ChallengeVerifier + 'static) -> Self {
        self.verifier = Some(Box::new(verifier));
        self
    }

    #[must_use]
    pub fn with_mailer(mut self, mailer: impl MailRelay + 'static) -> Self {
        self.mailer = Some(Box::new(mailer));
        self
    }

    /// Run every step, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Any `RelayError`; `RelayError::status_code` gives the matching response.
    pub async fn process(&self, request: &InboundRequest) -> Result<(), RelayError> {
        if !request.is_method("POST") {
            return Err(RelayError::MethodNotAllowed);
        }

        let submission = parse_submission(request)?;

        #[cfg(feature = "debug-logs")]
        info!("Decoded submission: {:?}", submission);

        submission.validate()?;

        if let Some(verifier) = &self.verifier {
            if submission.challenge_token.is_empty() {
                return Err(RelayError::CaptchaRequired);
            }
            if !verifier.verify(&submission.challenge_token).await? {
                return Err(RelayError::CaptchaFailed);
            }
        }

        if let Some(mailer) = &self.mailer {
            let email = compose_email(&submission, &self.mail_from, &self.mail_to);
            mailer.send(&email).await?;
        }

        Ok(())
    }

    /// Map the outcome of [`Self::process`] onto a gateway response.
    pub async fn handle(&self, request: &InboundRequest) -> Value {
        match self.process(request).await {
            Ok(()) => {
                info!("Contact submission accepted");
                helpers::text_response(200, SUCCESS_MESSAGE)
            }
            Err(e) => {
                if e.is_client_error() {
                    warn!(status = e.status_code(), "Contact submission rejected: {}", e);
                } else {
                    error!(status = e.status_code(), "Contact submission failed: {}", e);
                }
                helpers::text_response(e.status_code(), e.public_message())
            }
        }
    }
}

/// Lambda handler for the contact endpoint.
///
/// # Errors
///
/// Never returns an error; every failure becomes a status response.
#[tracing::instrument(level = "info", skip(event), fields(correlation_id = %Uuid::new_v4()))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = ContactConfig::from_env();
    let service = ContactService::from_config(&config);
    let request = InboundRequest::from_event(&event.payload);

    info!(
        method = %request.method,
        verification = config.turnstile_secret.is_some(),
        relay = config.resend_api_key.is_some(),
        "Contact Lambda received request"
    );

    Ok(service.handle(&request).await)
}
