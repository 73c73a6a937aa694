//! Body decoding and field extraction for contact submissions.

use std::collections::HashMap;

use serde_json::Value;

use crate::api::parsing::InboundRequest;
use crate::core::models::SubmissionRequest;
use crate::errors::RelayError;

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decode the body according to its content type and pull out the known fields.
///
/// # Errors
///
/// `InvalidContentType` when the body is neither JSON nor form-encoded,
/// `ParseError` when it is malformed for the declared type.
pub fn parse_submission(request: &InboundRequest) -> Result<SubmissionRequest, RelayError> {
    let content_type = request.header("content-type").unwrap_or("").to_lowercase();

    let fields = if content_type.contains(JSON_CONTENT_TYPE) {
        json_fields(&request.body_text()?)?
    } else if content_type.contains(FORM_CONTENT_TYPE) {
        form_fields(&request.body_text()?)
    } else {
        return Err(RelayError::InvalidContentType);
    };

    let field = |key: &str| {
        fields
            .get(key)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    Ok(SubmissionRequest {
        name: field("name"),
        email: field("email"),
        subject: field("subject"),
        message: field("message"),
        phone: field("phone"),
        interest: field("interest"),
        challenge_token: field("cfToken"),
    })
}

fn json_fields(body: &str) -> Result<HashMap<String, String>, RelayError> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    let value: Value = serde_json::from_str(body)?;

    // A `null` document has no fields to read at all; other non-objects read as empty.
    let map = match value {
        Value::Object(map) => map,
        Value::Null => {
            return Err(RelayError::ParseError("JSON body is null".to_string()));
        }
        _ => return Ok(HashMap::new()),
    };

    Ok(map
        .into_iter()
        .map(|(k, v)| (k, coerce_to_string(v)))
        .collect())
}

fn form_fields(body: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

/// Loose string coercion for JSON values; falsy values become empty.
fn coerce_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}
