//! User-triggered flows: send, extract, compare
//!
//! Every flow takes the request gate before calling out and holds it until
//! the call resolves. Failures are recovered inside the flow: each becomes
//! exactly one system notice and is never retried.

mod comparison;
mod memory;
mod reply;

use crate::backend::{BackendError, BackendErrorKind};
use thiserror::Error;

pub const EMPTY_LOG_NOTICE: &str = "Please send some messages first!";
pub const EMPTY_PROBE_NOTICE: &str = "Please enter a message to compare personalities!";
pub const NO_REPLY: &str = "No response received from server";
pub const NO_COMPARISONS: &str = "No comparisons received from server";

/// A failed flow. `Display` is the notice text shown in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Network failure or unreadable body
    #[error("Error: {0}")]
    Transport(String),
    /// The backend answered with an `error` field
    #[error("Error: {0}")]
    Backend(String),
    /// Non-success status with a raw body
    #[error("Error {status}: {body}")]
    Http { status: u16, body: String },
    /// 2xx without the expected payload
    #[error("Error: {0}")]
    Malformed(String),
}

impl FlowError {
    /// Stable label for logs
    pub fn class(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Backend(_) => "backend",
            Self::Http { .. } => "http",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<BackendError> for FlowError {
    fn from(e: BackendError) -> Self {
        match e.kind {
            BackendErrorKind::Status(status) => Self::Http {
                status,
                body: e.message,
            },
            BackendErrorKind::Transport | BackendErrorKind::Decode => Self::Transport(e.message),
        }
    }
}

/// How a flow that ran ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Completed,
    /// Failed; already surfaced as a system notice
    Recovered(FlowError),
}

impl FlowOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A flow refused before any request was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowRejected {
    #[error("Another request is in progress")]
    Busy,
    #[error("Message cannot be empty")]
    EmptyInput,
    #[error("Conversation has no messages to send")]
    EmptyLog,
}

pub type FlowResult = Result<FlowOutcome, FlowRejected>;
