//! Error handling for ragchat.
//!
//! - [`StreamError`] covers the answer stream. It has a single variant; a
//!   failed stream always renders the same message.
//! - [`ApiError`] covers the request/response endpoints (sessions, history,
//!   documents), including local [`ValidationError`]s.
//! - Transport errors are [`crate::traits::HttpError`].
//!
//! | Source | Surfaced as | Retried |
//! |--------|-------------|---------|
//! | Stream read / request | fixed message in the answer bubble | No |
//! | Session list / history | logged, ignored | No |
//! | Document CRUD | message in the terminal | No |

mod api;
mod stream;

pub use api::{ApiError, ValidationError};
pub use stream::{StreamError, STREAM_FAILURE_MESSAGE};

/// Result alias for API client operations.
pub type ApiResult<T> = Result<T, ApiError>;
