//! HTTP transport seam.
//!
//! The API clients in `crate::api` only see [`HttpClient`]. Production uses
//! the reqwest adapter; tests use `MockHttpClient`.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use serde::{de::DeserializeOwned, Serialize};

/// Request or response headers, name to value.
pub type Headers = HashMap<String, String>;

/// Body of a streamed response, chunk by chunk.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self::with_headers(status, Headers::new(), body)
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response whose body is `value` as JSON.
    pub fn json_body<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::with_headers(status, headers, Bytes::from(body))
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The file half of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    pub data: Bytes,
}

/// A `multipart/form-data` body: text fields plus at most one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    /// Text fields in insertion order
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach the file part, replacing any earlier one.
    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.file = Some(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            data: data.into(),
        });
        self
    }

    /// First text field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v.as_str()))
    }
}

/// Transport failures.
///
/// A non-2xx status is only an error for [`HttpClient::post_stream`]; the
/// buffered verbs return the response and let the caller decide.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Could not reach the server
    ConnectionFailed(String),
    Timeout(String),
    /// Non-2xx status where a success was required
    ServerError { status: u16, message: String },
    /// Body read failed part way
    Io(String),
    InvalidUrl(String),
    Other(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } if message.is_empty() => {
                write!(f, "Server error ({})", status)
            }
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// HTTP operations the chat and document clients need.
///
/// # Example
///
/// ```ignore
/// use ragchat::traits::{HttpClient, Headers, HttpError};
///
/// async fn document_count<C: HttpClient>(client: &C) -> Result<usize, HttpError> {
///     let response = client.get("http://localhost:8080/api/documents", &Headers::new()).await?;
///     let docs: Vec<serde_json::Value> =
///         response.json().map_err(|e| HttpError::Other(e.to_string()))?;
///     Ok(docs.len())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST a string body (JSON for every endpoint here).
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST a `multipart/form-data` body.
    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError>;

    /// POST and hand back the body as it arrives.
    ///
    /// A non-2xx status is [`HttpError::ServerError`] and yields no stream.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}

/// Headers for a JSON request body.
pub fn json_headers() -> Headers {
    Headers::from([("Content-Type".to_string(), "application/json".to_string())])
}
