/*
[INPUT]:  Error sources (HTTP transport, API status codes, serialization, session storage)
[OUTPUT]: Tagged error type with a coarse kind used for redirect decisions
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or changing status classification
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the CloudTask client
#[derive(Error, Debug)]
pub enum CloudTaskError {
    /// Transport failure: connect, timeout, TLS, body read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the credential (401, or 422 for a malformed token)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// No session token is stored
    #[error("No session token, please log in")]
    MissingToken,

    /// Stored token carries an `exp` claim in the past
    #[error("Session token expired, please log in again")]
    TokenExpired,

    /// Server-side failure (5xx)
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status (409, 400, 404, ...)
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Coarse classification of a failure, the only thing callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential absent, expired or rejected
    Unauthorized,
    /// Backend unreachable or too slow
    Network,
    /// Backend failed or answered with something unreadable
    Server,
    /// Request was understood and refused, or local setup is wrong
    Client,
}

impl CloudTaskError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CloudTaskError::Unauthorized { .. }
            | CloudTaskError::MissingToken
            | CloudTaskError::TokenExpired => ErrorKind::Unauthorized,
            CloudTaskError::Http(err) if err.is_decode() => ErrorKind::Server,
            CloudTaskError::Http(_) => ErrorKind::Network,
            CloudTaskError::Server { .. }
            | CloudTaskError::Serialization(_)
            | CloudTaskError::InvalidResponse(_) => ErrorKind::Server,
            CloudTaskError::Api { .. }
            | CloudTaskError::UrlParse(_)
            | CloudTaskError::Config(_)
            | CloudTaskError::Storage(_) => ErrorKind::Client,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CloudTaskError::Http(err) => err.status(),
            CloudTaskError::Server { status, .. } => StatusCode::from_u16(*status).ok(),
            CloudTaskError::Api { code, .. } => StatusCode::from_u16(*code).ok(),
            _ => None,
        }
    }

    /// Build the error for a non-success response
    ///
    /// `message` is the backend's `msg` field when present, else the raw body.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                CloudTaskError::Unauthorized { message }
            }
            s if s.is_server_error() => CloudTaskError::Server {
                status: s.as_u16(),
                message,
            },
            s => CloudTaskError::Api {
                code: s.as_u16(),
                message,
            },
        }
    }
}

/// Pull a human message out of an error body
pub(crate) fn extract_error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let from_json = parsed.as_ref().and_then(|value| {
        ["msg", "message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
        None => body.trim().to_string(),
    }
}

/// Result type alias for CloudTask operations
pub type Result<T> = std::result::Result<T, CloudTaskError>;
