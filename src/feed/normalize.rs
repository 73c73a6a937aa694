use chrono::{SecondsFormat, Utc};

use crate::core::models::{FeedPost, RawPost};

pub const DEFAULT_MEDIA_TYPE: &str = "IMAGE";

/// Map a raw post onto the served shape. Empty strings count as missing.
#[must_use]
pub fn normalize_post(raw: &RawPost, profile_url: &str) -> FeedPost {
    FeedPost {
        id: present(&raw.id).unwrap_or_default().to_string(),
        caption: present(&raw.caption).unwrap_or_default().to_string(),
        media_url: present(&raw.media_url)
            .or_else(|| present(&raw.thumbnail_url))
            .unwrap_or_default()
            .to_string(),
        permalink: present(&raw.permalink).unwrap_or(profile_url).to_string(),
        timestamp: present(&raw.timestamp)
            .map_or_else(current_timestamp, ToString::to_string),
        media_type: present(&raw.media_type)
            .unwrap_or(DEFAULT_MEDIA_TYPE)
            .to_string(),
    }
}

/// Normalize the first `limit` posts.
#[must_use]
pub fn normalize_posts(raw: &[RawPost], limit: usize, profile_url: &str) -> Vec<FeedPost> {
    raw.iter()
        .take(limit)
        .map(|post| normalize_post(post, profile_url))
        .collect()
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
