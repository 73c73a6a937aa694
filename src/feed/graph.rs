//! Instagram Graph API access

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use crate::core::models::RawPost;
use crate::errors::RelayError;

pub const MEDIA_FIELDS: &[&str] = &[
    "id",
    "caption",
    "media_url",
    "permalink",
    "thumbnail_url",
    "media_type",
    "timestamp",
];

/// Somewhere recent posts can be fetched from.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Fetch up to `limit` recent posts. An empty list is a valid answer.
    async fn recent_media(&self, limit: usize) -> Result<Vec<RawPost>, RelayError>;
}

#[derive(Debug, Deserialize)]
struct MediaPage {
    #[serde(default)]
    data: Value,
}

pub struct GraphMediaSource {
    http: HttpClient,
    base_url: String,
    user_id: String,
    access_token: String,
}

impl GraphMediaSource {
    #[must_use]
    pub fn new(http: HttpClient, base_url: String, user_id: String, access_token: String) -> Self {
        Self {
            http,
            base_url,
            user_id,
            access_token,
        }
    }

    /// `{base}/{user_id}/media?fields=..&access_token=..&limit=..`
    ///
    /// # Errors
    ///
    /// `ParseError` if the configured base URL is unusable.
    pub fn media_url(&self, limit: usize) -> Result<Url, RelayError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| RelayError::ParseError(format!("graph base url: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| RelayError::ParseError("graph base url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&self.user_id)
            .push("media");

        url.query_pairs_mut()
            .append_pair("fields", &MEDIA_FIELDS.join(","))
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", &limit.to_string());

        Ok(url)
    }
}

#[async_trait]
impl MediaSource for GraphMediaSource {
    async fn recent_media(&self, limit: usize) -> Result<Vec<RawPost>, RelayError> {
        let url = self.media_url(limit)?;
        let resp = self.http.get(url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!("Instagram API error: status={} body={}", status, body_text);
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let page: MediaPage = resp.json().await?;
        let posts = parse_media_data(page.data)?;
        info!(count = posts.len(), "Fetched Instagram media");
        Ok(posts)
    }
}

/// A non-array `data` counts as empty; a record that can't be read fails the page.
fn parse_media_data(data: Value) -> Result<Vec<RawPost>, RelayError> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(RelayError::from))
            .collect(),
        _ => Ok(Vec::new()),
    }
}
