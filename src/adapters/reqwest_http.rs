//! Reqwest-based HTTP client adapter.
//!
//! Every verb goes through one request path ([`ReqwestHttpClient::send`]);
//! only the answer stream skips buffering and checks the status itself.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{multipart, Method, RequestBuilder};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, MultipartForm, Response};

/// Media type of the answer stream.
const EVENT_STREAM: &str = "text/event-stream";

/// Body attached to an outgoing request.
enum Payload {
    None,
    Text(String),
    Form(MultipartForm),
}

/// Map a reqwest failure onto the transport error taxonomy.
fn classify(err: reqwest::Error) -> HttpError {
    let text = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(text)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(text)
    } else if err.is_builder() {
        HttpError::InvalidUrl(text)
    } else if err.is_body() || err.is_decode() {
        HttpError::Io(text)
    } else {
        HttpError::Other(text)
    }
}

fn header_pairs(map: &HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

fn to_reqwest_form(form: MultipartForm) -> multipart::Form {
    let with_fields = form
        .fields
        .into_iter()
        .fold(multipart::Form::new(), |acc, (name, value)| acc.text(name, value));

    match form.file {
        Some(file) => {
            let part = multipart::Part::bytes(file.data.to_vec()).file_name(file.file_name);
            with_fields.part(file.field, part)
        }
        None => with_fields,
    }
}

/// HTTP client backed by a shared `reqwest::Client`.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use ragchat::adapters::ReqwestHttpClient;
/// use ragchat::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::with_connect_timeout(Duration::from_secs(10))?;
/// let response = client.get("http://localhost:8080/api/documents", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client whose connect phase is bounded by `timeout`.
    ///
    /// Reads are unbounded; an answer stream may stay open for minutes.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, HttpError> {
        reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map(Self::with_client)
            .map_err(classify)
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn request(&self, method: Method, url: &str, headers: &Headers, payload: Payload) -> RequestBuilder {
        let builder = headers
            .iter()
            .fold(self.client.request(method, url), |b, (k, v)| b.header(k, v));
        match payload {
            Payload::None => builder,
            Payload::Text(body) => builder.body(body),
            Payload::Form(form) => builder.multipart(to_reqwest_form(form)),
        }
    }

    /// Send and buffer the full response, whatever its status.
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &Headers,
        payload: Payload,
    ) -> Result<Response, HttpError> {
        let response = self
            .request(method, url, headers, payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let response_headers = header_pairs(response.headers());
        let body = response.bytes().await.map_err(classify)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::GET, url, headers, Payload::None).await
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::POST, url, headers, Payload::Text(body.to_string()))
            .await
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::PUT, url, headers, Payload::Text(body.to_string()))
            .await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.send(Method::DELETE, url, headers, Payload::None).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.send(Method::POST, url, headers, Payload::Form(form))
            .await
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let response = self
            .request(Method::POST, url, headers, Payload::Text(body.to_string()))
            .header(ACCEPT, EVENT_STREAM)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Box::pin(
            response.bytes_stream().map(|chunk| chunk.map_err(classify)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_connect_timeout_client_builds() {
        assert!(ReqwestHttpClient::with_connect_timeout(Duration::from_millis(250)).is_ok());
    }

    #[test]
    fn test_header_pairs_lowercases_names() {
        let mut map = HeaderMap::new();
        map.insert(reqwest::header::CONTENT_TYPE, EVENT_STREAM.parse().unwrap());

        let headers = header_pairs(&map);
        assert_eq!(headers.get("content-type").map(String::as_str), Some(EVENT_STREAM));
    }

    #[test]
    fn test_form_conversion_keeps_boundary_shape() {
        let form = MultipartForm::new()
            .text("title", "Handbook")
            .file("file", "handbook.md", Bytes::from_static(b"# Handbook"));
        let converted = to_reqwest_form(form);
        assert!(!converted.boundary().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_url_is_rejected() {
        let client = ReqwestHttpClient::new();
        let result = client.get("not a url", &Headers::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stream_to_closed_port_fails_before_streaming() {
        let client = ReqwestHttpClient::new();
        let result = client
            .post_stream("http://127.0.0.1:9/api/chat/stream", "{}", &Headers::new())
            .await;
        assert!(matches!(
            result,
            Err(HttpError::ConnectionFailed(_)) | Err(HttpError::Timeout(_)) | Err(HttpError::Other(_))
        ));
    }
}
