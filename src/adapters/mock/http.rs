//! Mock HTTP client for testing.
//!
//! Responses are configured per URL (optionally per method) and every call
//! is recorded so tests can assert on what was sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, MultipartForm, Response};

/// One call made on a [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// `GET`, `POST`, `PUT` or `DELETE`
    pub method: String,
    pub url: String,
    pub headers: Headers,
    /// String body of POST and PUT calls
    pub body: Option<String>,
    /// Body of multipart uploads
    pub form: Option<MultipartForm>,
}

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Buffered response (any status)
    Success(Response),
    /// Transport error
    Error(HttpError),
    /// Answer stream yielding these chunks, then ending
    Stream(Vec<Bytes>),
    /// Stream request that fails before any body
    StreamError(HttpError),
    /// Yield the chunks, then fail mid-stream
    StreamThenError(Vec<Bytes>, HttpError),
    /// Yield the chunks, then never finish
    StreamPending(Vec<Bytes>),
}

impl MockResponse {
    fn into_buffered(self, url: &str) -> Result<Response, HttpError> {
        match self {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) | MockResponse::StreamError(err) => Err(err),
            _ => Err(HttpError::Other(format!(
                "stream configured for buffered request to {}",
                url
            ))),
        }
    }

    fn into_stream(self, url: &str) -> Result<ByteStream, HttpError> {
        let chunks = |c: Vec<Bytes>| stream::iter(c.into_iter().map(Ok));
        match self {
            MockResponse::Stream(c) => Ok(Box::pin(chunks(c))),
            MockResponse::StreamThenError(c, err) => {
                Ok(Box::pin(chunks(c).chain(stream::once(async move { Err(err) }))))
            }
            MockResponse::StreamPending(c) => Ok(Box::pin(chunks(c).chain(stream::pending()))),
            MockResponse::Error(err) | MockResponse::StreamError(err) => Err(err),
            MockResponse::Success(_) => Err(HttpError::Other(format!(
                "buffered response configured for stream request to {}",
                url
            ))),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    /// Keyed by URL, or by `"METHOD URL"`
    responses: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    /// Method-keyed exact, then exact, then longest prefix, then fallback.
    fn lookup(&self, method: &str, url: &str) -> Option<MockResponse> {
        let keyed = format!("{} {}", method, url);
        if let Some(found) = self.responses.get(&keyed).or_else(|| self.responses.get(url)) {
            return Some(found.clone());
        }

        let method_prefix = format!("{} ", method);
        self.responses
            .iter()
            .filter_map(|(key, response)| {
                let pattern = match key.split_once(' ') {
                    Some(_) => key.strip_prefix(&method_prefix)?,
                    None => key.as_str(),
                };
                url.starts_with(pattern).then_some((pattern.len(), response))
            })
            .max_by_key(|(len, _)| *len)
            .map(|(_, response)| response.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// Mock HTTP client for testing.
///
/// Clones share configuration and recorded requests, so a test can keep a
/// handle after moving a clone into an API client.
///
/// # Example
///
/// ```ignore
/// use ragchat::adapters::mock::{MockHttpClient, MockResponse};
/// use ragchat::traits::{Headers, HttpClient, Response};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://localhost:8080/api/chat/sessions",
///     MockResponse::Success(Response::new(200, Bytes::from("[]"))),
/// );
///
/// client.get("http://localhost:8080/api/chat/sessions", &Headers::new()).await?;
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Answer every method on `url` (or any URL it prefixes).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.state().responses.insert(url.to_string(), response);
    }

    /// Answer one method on `url`; wins over [`MockHttpClient::set_response`].
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        self.state()
            .responses
            .insert(format!("{} {}", method, url), response);
    }

    /// Answer anything not otherwise configured.
    pub fn set_default_response(&self, response: MockResponse) {
        self.state().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn clear_responses(&self) {
        let mut state = self.state();
        state.responses.clear();
        state.fallback = None;
    }

    /// Record the call and look up its configured response.
    fn respond(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
        form: Option<MultipartForm>,
    ) -> Result<MockResponse, HttpError> {
        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
            form,
        });
        state
            .lookup(method, url)
            .ok_or_else(|| HttpError::Other(format!("no mock response for {} {}", method, url)))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond("GET", url, headers, None, None)?
            .into_buffered(url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond("POST", url, headers, Some(body), None)?
            .into_buffered(url)
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond("PUT", url, headers, Some(body), None)?
            .into_buffered(url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond("DELETE", url, headers, None, None)?
            .into_buffered(url)
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: MultipartForm,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.respond("POST", url, headers, None, Some(form))?
            .into_buffered(url)
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.respond("POST", url, headers, Some(body), None)?
            .into_stream(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "http://localhost/api/documents/7";

    fn ok(status: u16, body: &'static str) -> MockResponse {
        MockResponse::Success(Response::new(status, Bytes::from_static(body.as_bytes())))
    }

    async fn collect(mut stream: ByteStream) -> Vec<Result<Bytes, HttpError>> {
        let mut out = Vec::new();
        while let Some(item) = stream.next().await {
            out.push(item);
        }
        out
    }

    #[tokio::test]
    async fn test_unconfigured_url_is_an_error_and_still_recorded() {
        let client = MockHttpClient::new();

        let result = client.get("http://localhost/nothing", &Headers::new()).await;

        assert!(matches!(result, Err(HttpError::Other(_))));
        assert_eq!(client.get_requests()[0].url, "http://localhost/nothing");
    }

    #[tokio::test]
    async fn test_method_key_beats_plain_url() {
        let client = MockHttpClient::new();
        client.set_response(DOC, ok(200, "get"));
        client.set_method_response("DELETE", DOC, ok(204, ""));

        let get = client.get(DOC, &Headers::new()).await.unwrap();
        let delete = client.delete(DOC, &Headers::new()).await.unwrap();

        assert_eq!(get.status, 200);
        assert_eq!(delete.status, 204);
        assert_eq!(client.requests_with_method("DELETE").len(), 1);
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response("http://localhost/api", ok(200, "short"));
        client.set_response("http://localhost/api/documents", ok(200, "long"));

        let response = client.get(DOC, &Headers::new()).await.unwrap();

        assert_eq!(response.text(), "long");
    }

    #[tokio::test]
    async fn test_method_prefix_ignored_for_other_methods() {
        let client = MockHttpClient::new();
        client.set_method_response("PUT", "http://localhost/api/documents", ok(200, "put"));
        client.set_default_response(ok(200, "fallback"));

        let response = client.get(DOC, &Headers::new()).await.unwrap();

        assert_eq!(response.text(), "fallback");
    }

    #[tokio::test]
    async fn test_bodies_and_forms_are_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(ok(200, ""));

        client
            .put(DOC, r#"{"title":"t"}"#, &Headers::new())
            .await
            .unwrap();
        let form = MultipartForm::new().text("title", "Guide");
        client
            .post_multipart("http://localhost/api/documents/upload", form, &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"title":"t"}"#));
        assert_eq!(requests[1].form.as_ref().unwrap().field("title"), Some("Guide"));
        assert!(requests[1].body.is_none());
    }

    #[tokio::test]
    async fn test_stream_then_error_ends_after_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://localhost/stream",
            MockResponse::StreamThenError(
                vec![Bytes::from("partial")],
                HttpError::Io("reset".to_string()),
            ),
        );

        let stream = client
            .post_stream("http://localhost/stream", "{}", &Headers::new())
            .await
            .unwrap();

        assert_eq!(
            collect(stream).await,
            vec![Ok(Bytes::from("partial")), Err(HttpError::Io("reset".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_stream_error_fails_the_request() {
        let client = MockHttpClient::new();
        client.set_response(
            "http://localhost/stream",
            MockResponse::StreamError(HttpError::ServerError {
                status: 500,
                message: "boom".to_string(),
            }),
        );

        let result = client
            .post_stream("http://localhost/stream", "{}", &Headers::new())
            .await;

        assert!(matches!(result, Err(HttpError::ServerError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_reported() {
        let client = MockHttpClient::new();
        client.set_response("http://localhost/stream", MockResponse::Stream(vec![]));
        client.set_response("http://localhost/json", ok(200, "{}"));

        let buffered = client.get("http://localhost/stream", &Headers::new()).await;
        let streamed = client
            .post_stream("http://localhost/json", "{}", &Headers::new())
            .await;

        assert!(matches!(buffered, Err(HttpError::Other(_))));
        assert!(matches!(streamed, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let client = MockHttpClient::new();
        let handle = client.clone();
        handle.set_default_response(ok(200, ""));

        client.get(DOC, &Headers::new()).await.unwrap();

        assert_eq!(handle.get_requests().len(), 1);
        handle.clear_requests();
        handle.clear_responses();
        assert!(client.get_requests().is_empty());
        assert!(client.get(DOC, &Headers::new()).await.is_err());
    }
}
