use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Invalid content type")]
    InvalidContentType,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Captcha required")]
    CaptchaRequired,

    #[error("Captcha verification failed")]
    CaptchaFailed,

    #[error("Failed to send message: upstream returned {status}: {body}")]
    SendFailed { status: u16, body: String },

    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
}

impl RelayError {
    /// HTTP status returned to the caller for this outcome.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::MethodNotAllowed => 405,
            RelayError::InvalidContentType
            | RelayError::MissingFields
            | RelayError::CaptchaRequired
            | RelayError::CaptchaFailed => 400,
            RelayError::PayloadTooLarge => 413,
            RelayError::SendFailed { .. } => 502,
            RelayError::ParseError(_)
            | RelayError::HttpError(_)
            | RelayError::UpstreamStatus { .. } => 500,
        }
    }

    /// Plain-text body returned to the caller. Internal details never leak here.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed => "Method Not Allowed",
            RelayError::InvalidContentType => "Invalid content type",
            RelayError::MissingFields => "Missing required fields",
            RelayError::PayloadTooLarge => "Payload too large",
            RelayError::CaptchaRequired => "Captcha required",
            RelayError::CaptchaFailed => "Captcha verification failed",
            RelayError::SendFailed { .. } => "Failed to send message",
            RelayError::ParseError(_)
            | RelayError::HttpError(_)
            | RelayError::UpstreamStatus { .. } => "Internal Server Error",
        }
    }

    /// True for outcomes caused by the caller's input rather than a failure on our side.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::ParseError(error.to_string())
    }
}

impl From<base64::DecodeError> for RelayError {
    fn from(error: base64::DecodeError) -> Self {
        RelayError::ParseError(format!("invalid base64 body: {error}"))
    }
}

impl From<std::string::FromUtf8Error> for RelayError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        RelayError::ParseError(format!("body is not valid UTF-8: {error}"))
    }
}
