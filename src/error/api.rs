//! Errors for the request/response endpoints (sessions, history, documents).

use thiserror::Error;

use crate::traits::HttpError;

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
    #[error("a file is required")]
    MissingFile,
}

/// Error type for API client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an unexpected status
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Local input validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Reading a local file for upload failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Whether the error came from the user's input rather than the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    /// Short message suitable for the terminal.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(e) => {
                let text = e.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str() + ".",
                    None => text,
                }
            }
            ApiError::Status { status: 404, .. } => "Not found.".to_string(),
            ApiError::Io(e) => format!("Could not read file: {}", e),
            other => format!("Request failed: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err: ApiError = ValidationError::MissingTitle.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "a title is required");
        assert_eq!(err.user_message(), "A title is required.");
    }

    #[test]
    fn test_status_display() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (500): boom");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_not_found_user_message() {
        let err = ApiError::Status {
            status: 404,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Not found.");
    }

    #[test]
    fn test_from_http_error_is_transparent() {
        let err: ApiError = HttpError::Timeout("30s".to_string()).into();
        assert_eq!(err.to_string(), "Request timeout: 30s");
    }
}
