//! Email relay through the Resend API

use std::fmt::Write as _;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::{error, info};

use crate::core::models::SubmissionRequest;
use crate::errors::RelayError;

/// The JSON document Resend expects on `POST /emails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

/// Build the notification email for a validated submission.
#[must_use]
pub fn compose_email(submission: &SubmissionRequest, from: &str, to: &[String]) -> OutgoingEmail {
    let subject = if submission.subject.is_empty() {
        format!("New contact from {}", submission.name)
    } else {
        submission.subject.clone()
    };

    let mut text = format!("Name: {}\nEmail: {}", submission.name, submission.email);
    if !submission.phone.is_empty() {
        let _ = write!(text, "\nPhone: {}", submission.phone);
    }
    if !submission.interest.is_empty() {
        let _ = write!(text, "\nInterest: {}", submission.interest);
    }
    let _ = write!(text, "\n\n{}", submission.message);

    OutgoingEmail {
        from: from.to_string(),
        to: to.to_vec(),
        subject,
        text,
    }
}

/// Hands a composed email to the service that actually delivers it.
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// # Errors
    ///
    /// `SendFailed` when the service answers with a non-success status,
    /// `HttpError` when it cannot be reached or its answer cannot be read.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError>;
}

pub struct ResendMailer {
    http: HttpClient,
    api_key: String,
    api_url: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(http: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl MailRelay for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError> {
        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await?;
            error!("Resend error: status={} body={}", status, body_text);
            return Err(RelayError::SendFailed {
                status: status.as_u16(),
                body: body_text,
            });
        }

        info!("Contact email handed to Resend");
        Ok(())
    }
}
