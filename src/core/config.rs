use std::env;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_TURNSTILE_VERIFY_URL: &str =
    "https://challenges.cloudflare.com/turnstile/v0/siteverify";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";
pub const DEFAULT_CONTACT_FROM: &str = "Website <no-reply@responsible-individuals.org>";
pub const DEFAULT_CONTACT_TO: &str = "theresponsibleindividuals@gmail.com";

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.instagram.com";
pub const INSTAGRAM_PROFILE_URL: &str = "https://www.instagram.com/responsibleindividuals/";

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for the contact Lambda.
///
/// `turnstile_secret` and `resend_api_key` double as feature switches: when
/// either is `None` the matching step is skipped.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub turnstile_secret: Option<String>,
    pub resend_api_key: Option<String>,
    pub turnstile_verify_url: String,
    pub resend_api_url: String,
    pub mail_from: String,
    pub mail_to: Vec<String>,
    pub upstream_timeout: Duration,
}

impl ContactConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mail_to = non_empty(lookup("CONTACT_TO"))
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|addr| !addr.is_empty())
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CONTACT_TO.to_string()]);

        Self {
            turnstile_secret: non_empty(lookup("TURNSTILE_SECRET_KEY")),
            resend_api_key: non_empty(lookup("RESEND_API_KEY")),
            turnstile_verify_url: non_empty(lookup("TURNSTILE_VERIFY_URL"))
                .unwrap_or_else(|| DEFAULT_TURNSTILE_VERIFY_URL.to_string()),
            resend_api_url: non_empty(lookup("RESEND_API_URL"))
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            mail_from: non_empty(lookup("CONTACT_FROM"))
                .unwrap_or_else(|| DEFAULT_CONTACT_FROM.to_string()),
            mail_to,
            upstream_timeout: parse_timeout(lookup("UPSTREAM_TIMEOUT_SECS")),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Settings for the feed Lambda.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub instagram_user_id: Option<String>,
    pub instagram_access_token: Option<String>,
    pub graph_base_url: String,
    pub profile_url: String,
    pub upstream_timeout: Duration,
}

impl FeedConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            instagram_user_id: non_empty(lookup("INSTAGRAM_USER_ID")),
            instagram_access_token: non_empty(lookup("INSTAGRAM_ACCESS_TOKEN")),
            graph_base_url: non_empty(lookup("INSTAGRAM_GRAPH_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string()),
            profile_url: INSTAGRAM_PROFILE_URL.to_string(),
            upstream_timeout: parse_timeout(lookup("UPSTREAM_TIMEOUT_SECS")),
        }
    }

    /// Account id and token, only when both are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.instagram_user_id, &self.instagram_access_token) {
            (Some(user_id), Some(token)) => Some((user_id.as_str(), token.as_str())),
            _ => None,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// An empty variable is treated the same as an unset one.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_timeout(raw: Option<String>) -> Duration {
    let Some(raw) = non_empty(raw) else {
        return DEFAULT_UPSTREAM_TIMEOUT;
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            warn!("Invalid UPSTREAM_TIMEOUT_SECS value '{}', using default", raw);
            DEFAULT_UPSTREAM_TIMEOUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn contact_defaults_disable_optional_steps() {
        let config = ContactConfig::default();
        assert!(config.turnstile_secret.is_none());
        assert!(config.resend_api_key.is_none());
        assert_eq!(config.mail_from, DEFAULT_CONTACT_FROM);
        assert_eq!(config.mail_to, vec![DEFAULT_CONTACT_TO.to_string()]);
        assert_eq!(config.upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);
    }

    #[test]
    fn empty_secret_counts_as_absent() {
        let config = ContactConfig::from_lookup(lookup_from(&[
            ("TURNSTILE_SECRET_KEY", ""),
            ("RESEND_API_KEY", "re_123"),
        ]));
        assert!(config.turnstile_secret.is_none());
        assert_eq!(config.resend_api_key.as_deref(), Some("re_123"));
    }

    #[test]
    fn contact_to_accepts_a_list() {
        let config = ContactConfig::from_lookup(lookup_from(&[(
            "CONTACT_TO",
            "a@example.org, b@example.org ,",
        )]));
        assert_eq!(config.mail_to, vec!["a@example.org", "b@example.org"]);
    }

    #[test]
    fn invalid_timeout_falls_back_to_default() {
        let config = FeedConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);

        let config = FeedConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "0")]));
        assert_eq!(config.upstream_timeout, DEFAULT_UPSTREAM_TIMEOUT);

        let config = FeedConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "9")]));
        assert_eq!(config.upstream_timeout, Duration::from_secs(9));
    }

    #[test]
    fn feed_credentials_need_both_values() {
        let config = FeedConfig::from_lookup(lookup_from(&[("INSTAGRAM_USER_ID", "1784")]));
        assert!(config.credentials().is_none());

        let config = FeedConfig::from_lookup(lookup_from(&[
            ("INSTAGRAM_USER_ID", "1784"),
            ("INSTAGRAM_ACCESS_TOKEN", "IGQV"),
        ]));
        assert_eq!(config.credentials(), Some(("1784", "IGQV")));
        assert_eq!(config.graph_base_url, DEFAULT_GRAPH_BASE_URL);
    }
}
