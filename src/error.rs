//! Error taxonomy for the pipeline.
//!
//! Every failure a caller may want to branch on is a distinct variant, so
//! callers never string-match error text. Partial upload failure is not an
//! error at all; it is reported through `publish::PublishReport`.

use std::fmt;

use thiserror::Error;

/// Structured detail of a remote rejection.
///
/// Carries the HTTP status and the response body (pretty-printed when the
/// body parses as JSON, raw text otherwise) so user-facing messages can
/// always show what the remote system actually said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status code returned by the remote system.
    pub status: u16,
    /// Response body, pretty-printed JSON when parseable.
    pub body: String,
}

impl RemoteError {
    /// Builds a `RemoteError` from a raw response body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| body.to_string());
        Self { status, body }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "status {}", self.status)
        } else {
            write!(f, "status {}: {}", self.status, self.body)
        }
    }
}

/// All failure modes of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Required credentials or identifiers are missing. Fatal before any
    /// network call is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The authentication probe was rejected. Fatal for the current run,
    /// never retried automatically.
    #[error("authentication failed: {detail}")]
    Authentication {
        /// What the remote system said when it rejected the credentials.
        detail: String,
    },

    /// The remote ticket does not exist. Terminal, not retried.
    #[error("ticket not found: {key}")]
    NotFound {
        /// The (trimmed) ticket key that was looked up.
        key: String,
    },

    /// Timeout or connection failure. Retried where a retry policy applies.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote system rejected a payload with a non-2xx status.
    #[error("remote rejected request ({0})")]
    RemoteValidation(RemoteError),
}

impl Error {
    /// Whether a bounded-retry policy should retry this error.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
