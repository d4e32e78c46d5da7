//! Error types for the API client.

use std::fmt;

use serde_json::Value;

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// HTTP 401.
    Authentication,
    /// HTTP 403.
    Authorization,
    /// HTTP 429.
    RateLimit,
    /// Any other 4xx.
    InvalidRequest,
    /// 5xx.
    Api,
    /// Everything else, most commonly a 2xx response whose envelope carries
    /// a nonzero `code`.
    Unclassified,
}

impl ErrorKind {
    /// Maps an HTTP status to its error kind. Total over all `u16` values.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            429 => ErrorKind::RateLimit,
            400..=499 => ErrorKind::InvalidRequest,
            500..=599 => ErrorKind::Api,
            _ => ErrorKind::Unclassified,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication error",
            ErrorKind::Authorization => "authorization error",
            ErrorKind::RateLimit => "rate limit error",
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::Api => "API error",
            ErrorKind::Unclassified => "request failed",
        };
        f.write_str(name)
    }
}

/// The request that produced an [`ApiError`], kept for diagnostics.
///
/// Headers are not recorded so the access token never ends up in error
/// reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSummary {
    pub method: String,
    pub url: String,
    pub params: Value,
}

/// A classified failure returned by the TikTok API.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message} (HTTP {status_code})")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status_code: u16,
    body: Value,
    request: Option<RequestSummary>,
}

impl ApiError {
    /// Builds the error for a failed response from its status and parsed body.
    pub fn from_response(status_code: u16, body: Value, request: Option<RequestSummary>) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status_code));
        Self {
            kind: ErrorKind::from_status(status_code),
            message,
            status_code,
            body,
            request,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Parsed response body, or the synthetic `{"error": ...}` object when
    /// the body was not valid JSON.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The envelope's numeric `code`, when present.
    pub fn api_code(&self) -> Option<i64> {
        self.body.get("code").and_then(Value::as_i64)
    }

    pub fn request(&self) -> Option<&RequestSummary> {
        self.request.as_ref()
    }
}

/// Errors that can occur when using the client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API answered with a failure status or a nonzero envelope code.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Local argument or configuration problem, detected before any request.
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Network error, timeout, or TLS failure from the HTTP engine.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Reading a local upload file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Request parameters or response data could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The base URL and path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A caller-supplied header name or value was not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Kind of the API failure, or `None` for local and transport errors.
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// HTTP status of the API failure, if this is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status_code()),
            _ => None,
        }
    }
}
