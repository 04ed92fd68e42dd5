//! Typed clients for the chat server's HTTP endpoints.
//!
//! Both clients are generic over [`crate::traits::HttpClient`] so tests can drive them with
//! [`crate::adapters::MockHttpClient`].

mod chat;
mod documents;

pub use chat::ChatApi;
pub use documents::{DocumentApi, UploadRequest};

use crate::error::{ApiError, ApiResult};
use crate::traits::Response;

/// Turn a non-2xx response into [`ApiError::Status`].
fn check_status(response: &Response) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        message: response.text(),
    })
}

/// Join a base URL and an absolute path.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
