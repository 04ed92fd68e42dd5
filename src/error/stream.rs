//! Streaming-related error types.
//!
//! A chat stream either completes or fails; there is no partial-success
//! state and no retry. Every failure collapses into [`StreamError::Failed`],
//! which the UI renders as one fixed message.

use thiserror::Error;

/// Text shown in place of an answer whose stream failed.
pub const STREAM_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Stream failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The request or the body read failed.
    #[error("stream failed: {message}")]
    Failed { message: String },
}

impl StreamError {
    pub fn failed(message: impl Into<String>) -> Self {
        StreamError::Failed {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Always the same fixed string; details go to the log only.
    pub fn user_message(&self) -> &'static str {
        STREAM_FAILURE_MESSAGE
    }

    /// Streams are never retried.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Get the error code for logging/debugging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Failed { .. } => "STREAM_FAILED",
        }
    }
}

impl From<crate::traits::HttpError> for StreamError {
    fn from(err: crate::traits::HttpError) -> Self {
        StreamError::failed(err.to_string())
    }
}
