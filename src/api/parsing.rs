use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::RelayError;

/// The parts of a gateway proxy event the handlers care about.
///
/// Accepts both the v1 / Netlify shape (`httpMethod`, `queryStringParameters`)
/// and the v2 shape (`requestContext.http.method`, `rawQueryString`).
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
    pub query: HashMap<String, String>,
}

impl InboundRequest {
    #[must_use]
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn from_event(payload: &Value) -> Self {
        let method = v_str(payload, &["httpMethod"])
            .or_else(|| v_str(payload, &["requestContext", "http", "method"]))
            .unwrap_or_default()
            .to_string();

        let headers: Vec<(String, String)> = payload
            .get("headers")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let body = payload
            .get("body")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        let is_base64_encoded = payload
            .get("isBase64Encoded")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let query_map = payload
            .get("queryStringParameters")
            .and_then(Value::as_object);
        let query: HashMap<String, String> = match query_map {
            Some(map) => map
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect(),
            None => v_str(payload, &["rawQueryString"])
                .map(parse_query_string)
                .unwrap_or_default(),
        };

        Self {
            method,
            headers,
            body,
            is_base64_encoded,
            query,
        }
    }

    #[must_use]
    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// The request body as text, base64-decoded when the gateway flagged it.
    ///
    /// # Errors
    ///
    /// `ParseError` if a flagged body is not valid base64 or not valid UTF-8.
    pub fn body_text(&self) -> Result<String, RelayError> {
        let Some(body) = self.body.as_deref() else {
            return Ok(String::new());
        };
        if !self.is_base64_encoded {
            return Ok(body.to_string());
        }
        let bytes = STANDARD.decode(body.trim())?;
        Ok(String::from_utf8(bytes)?)
    }
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// Parse `a=1&b=2` into a map; later keys overwrite earlier ones.
#[must_use]
pub fn parse_query_string(raw: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}
