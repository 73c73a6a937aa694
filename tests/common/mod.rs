#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use async_trait::async_trait;
use site_relay::RelayError;
use site_relay::api::parsing::InboundRequest;
use site_relay::contact::{ChallengeVerifier, MailRelay, OutgoingEmail};
use site_relay::core::models::RawPost;
use site_relay::feed::MediaSource;

/// Verifier with a fixed verdict that counts how often it was asked.
#[derive(Clone)]
pub struct FakeVerifier {
    verdict: Result<bool, String>,
    pub calls: Arc<AtomicUsize>,
    pub tokens: Arc<Mutex<Vec<String>>>,
}

impl FakeVerifier {
    pub fn accepting() -> Self {
        Self::with_verdict(Ok(true))
    }

    pub fn rejecting() -> Self {
        Self::with_verdict(Ok(false))
    }

    pub fn unreachable() -> Self {
        Self::with_verdict(Err("connection refused".to_string()))
    }

    fn with_verdict(verdict: Result<bool, String>) -> Self {
        Self {
            verdict,
            calls: Arc::new(AtomicUsize::new(0)),
            tokens: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChallengeVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<bool, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().unwrap().push(token.to_string());
        self.verdict.clone().map_err(RelayError::HttpError)
    }
}

/// Mail relay that records what it was asked to send.
#[derive(Clone)]
pub struct FakeMailer {
    upstream_status: Option<u16>,
    pub sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl FakeMailer {
    pub fn ok() -> Self {
        Self {
            upstream_status: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every send is answered with `status` by the pretend upstream.
    pub fn failing_with(status: u16) -> Self {
        Self {
            upstream_status: Some(status),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailRelay for FakeMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), RelayError> {
        self.sent.lock().unwrap().push(email.clone());
        match self.upstream_status {
            None => Ok(()),
            Some(status) => Err(RelayError::SendFailed {
                status,
                body: "{\"message\":\"rejected\"}".to_string(),
            }),
        }
    }
}

pub enum MediaOutcome {
    Posts(Vec<RawPost>),
    Status(u16),
    Broken,
}

/// Media source with a canned answer that records the requested limit.
pub struct FakeMedia {
    outcome: MediaOutcome,
    pub limits: Arc<Mutex<Vec<usize>>>,
}

impl FakeMedia {
    pub fn new(outcome: MediaOutcome) -> Self {
        Self {
            outcome,
            limits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl MediaSource for FakeMedia {
    async fn recent_media(&self, limit: usize) -> Result<Vec<RawPost>, RelayError> {
        self.limits.lock().unwrap().push(limit);
        match &self.outcome {
            MediaOutcome::Posts(posts) => Ok(posts.clone()),
            MediaOutcome::Status(status) => Err(RelayError::UpstreamStatus {
                status: *status,
                body: "{\"error\":{\"code\":190}}".to_string(),
            }),
            MediaOutcome::Broken => Err(RelayError::ParseError("expected value".to_string())),
        }
    }
}

pub fn form_post(body: &str) -> InboundRequest {
    InboundRequest::new("POST")
        .with_header("Content-Type", "application/x-www-form-urlencoded")
        .with_body(body)
}

pub fn json_post(body: &str) -> InboundRequest {
    InboundRequest::new("POST")
        .with_header("content-type", "application/json")
        .with_body(body)
}

pub fn upstream_post(id: &str) -> RawPost {
    RawPost {
        id: Some(id.to_string()),
        caption: Some(format!("caption {id}")),
        media_url: Some(format!("https://scontent.cdninstagram.com/{id}.jpg")),
        permalink: Some(format!("https://www.instagram.com/p/{id}/")),
        timestamp: Some("2025-09-01T08:00:00+0000".to_string()),
        media_type: Some("IMAGE".to_string()),
        ..RawPost::default()
    }
}

/// One request as seen by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Minimal HTTP/1.1 server on a loopback port that records every request and
/// answers each one with the same canned response.
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub fn start(status: u16, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub");
        let url = format!("http://{}", listener.local_addr().expect("stub addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        let response = format!(
            "HTTP/1.1 {status} Stub\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                if let Some(request) = read_request(&stream) {
                    recorded.lock().unwrap().push(request);
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':')?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}
