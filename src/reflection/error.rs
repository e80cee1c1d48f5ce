use thiserror::Error;

use crate::upstream::TransportError;

pub const RATE_LIMITED_MESSAGE: &str = "Taking a moment to breathe... Please try again shortly.";
pub const QUOTA_EXHAUSTED_MESSAGE: &str =
    "AI features need a little rest. Please check your usage.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Everything that can stop a reflection from coming back
///
/// The `Display` text is for operators and logs. Callers only ever see
/// `client_message()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReflectError {
    #[error("upstream credential is not configured")]
    MissingCredential,

    #[error("unknown reflection type: {0}")]
    UnknownRequestType(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("upstream rate limited the request")]
    RateLimited,

    #[error("upstream usage quota exhausted")]
    QuotaExhausted,

    #[error("upstream returned status {status}")]
    UpstreamFailed { status: u16 },

    #[error("malformed upstream response: {0}")]
    MalformedUpstream(String),

    #[error("upstream request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

impl ReflectError {
    /// HTTP status surfaced to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            ReflectError::UnknownRequestType(_) | ReflectError::InvalidBody(_) => 400,
            ReflectError::QuotaExhausted => 402,
            ReflectError::RateLimited => 429,
            ReflectError::MissingCredential
            | ReflectError::UpstreamFailed { .. }
            | ReflectError::MalformedUpstream(_)
            | ReflectError::Timeout
            | ReflectError::Transport(_) => 500,
        }
    }

    /// Softly worded, caller-safe message
    pub fn client_message(&self) -> &'static str {
        match self {
            ReflectError::UnknownRequestType(_) => "Unknown reflection type",
            ReflectError::InvalidBody(_) => "Invalid request body",
            ReflectError::RateLimited => RATE_LIMITED_MESSAGE,
            ReflectError::QuotaExhausted => QUOTA_EXHAUSTED_MESSAGE,
            ReflectError::MissingCredential => "Gentle reflections are not available right now.",
            ReflectError::Transport(_) => "Couldn't reach the reflection service. Please try again.",
            ReflectError::UpstreamFailed { .. }
            | ReflectError::MalformedUpstream(_)
            | ReflectError::Timeout => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Whether the failure was decided before any network I/O
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            ReflectError::MissingCredential
                | ReflectError::UnknownRequestType(_)
                | ReflectError::InvalidBody(_)
        )
    }
}

impl From<TransportError> for ReflectError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => ReflectError::Timeout,
            other => ReflectError::Transport(other.to_string()),
        }
    }
}
