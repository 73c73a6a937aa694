use serde::{Deserialize, Serialize};

use crate::errors::RelayError;

pub const MAX_NAME_CHARS: usize = 200;
pub const MAX_EMAIL_CHARS: usize = 320;
pub const MAX_SUBJECT_CHARS: usize = 200;
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// A contact form submission after field extraction. Every field is already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub phone: String,
    pub interest: String,
    pub challenge_token: String,
}

impl SubmissionRequest {
    /// Required fields first, then length ceilings.
    ///
    /// # Errors
    ///
    /// `MissingFields` when name, email or message is empty, `PayloadTooLarge`
    /// when any bounded field exceeds its ceiling.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(RelayError::MissingFields);
        }

        let too_long = exceeds(&self.name, MAX_NAME_CHARS)
            || exceeds(&self.email, MAX_EMAIL_CHARS)
            || exceeds(&self.subject, MAX_SUBJECT_CHARS)
            || exceeds(&self.message, MAX_MESSAGE_CHARS);
        if too_long {
            return Err(RelayError::PayloadTooLarge);
        }

        Ok(())
    }
}

// Ceilings are in UTF-16 code units.
fn exceeds(value: &str, max_units: usize) -> bool {
    value.encode_utf16().count() > max_units
}

/// Effective page size for a feed request, always within `[MIN_LIMIT, MAX_LIMIT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery {
    pub limit: usize,
}

impl FeedQuery {
    pub const MIN_LIMIT: usize = 1;
    pub const MAX_LIMIT: usize = 12;
    pub const DEFAULT_LIMIT: usize = 4;
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// A post as the Graph API (or the bundled sample set) describes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// The post shape served to the website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: String,
    pub caption: String,
    pub media_url: String,
    pub permalink: String,
    pub timestamp: String,
    pub media_type: String,
}
