//! Backend wire errors

use thiserror::Error;

/// Failure talking to the backend, classified by where it happened
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Decode, message)
    }

    /// Non-success HTTP status; `body` is the raw response text
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Status(status), body)
    }

    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::transport(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            Self::transport(format!("Connection failed: {e}"))
        } else if e.is_decode() {
            Self::decode(format!("Failed to decode response: {e}"))
        } else {
            Self::transport(format!("Request failed: {e}"))
        }
    }
}

/// Where a backend call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Network issues, connection refused, body read failures
    Transport,
    /// Response body was not the expected JSON
    Decode,
    /// Server answered with a non-success status
    Status(u16),
}

impl BackendErrorKind {
    pub fn status_code(self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(code),
            Self::Transport | Self::Decode => None,
        }
    }
}
