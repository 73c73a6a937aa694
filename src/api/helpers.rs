//! Response builders shared by both handlers.
//!
//! Gateway responses are JSON objects of the form
//! `{ "statusCode": u16, "headers": {..}, "body": "<string>" }`.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

pub const FEED_CACHE_CONTROL: &str = "public, max-age=900";

/// Returns a plain-text response with the given status code.
#[must_use]
pub fn text_response(status_code: u16, body: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "text/plain; charset=utf-8" },
        "body": body
    })
}

/// Returns a cacheable, cross-origin JSON response.
///
/// Serialization of our own types cannot realistically fail; if it does the
/// body degrades to an empty array so the page still receives valid JSON.
#[must_use]
pub fn public_json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|e| {
        error!("Failed to serialize response body: {}", e);
        "[]".to_string()
    });
    json!({
        "statusCode": status_code,
        "headers": {
            "Content-Type": "application/json",
            "Cache-Control": FEED_CACHE_CONTROL,
            "Access-Control-Allow-Origin": "*"
        },
        "body": body
    })
}

#[must_use]
pub fn status_of(response: &Value) -> Option<u16> {
    response
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
}

#[must_use]
pub fn body_of(response: &Value) -> &str {
    response.get("body").and_then(Value::as_str).unwrap_or("")
}
