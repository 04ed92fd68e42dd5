//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `ragchat::adapters::mock` and adds builders for
//! the responses the chat server sends.

pub use ragchat::adapters::mock::{
    InMemoryConversationStore, MockHttpClient, MockResponse, RecordingView, ViewEvent,
};
pub use ragchat::traits::{HttpClient, HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a JSON response for any method on `url`.
    pub fn with_json_response(self, url: &str, status: u16, json: &str) -> Self {
        self.client.set_response(url, json_response(status, json));
        self
    }

    /// Configures a JSON response for one method on `url`.
    pub fn with_method_response(self, method: &str, url: &str, status: u16, json: &str) -> Self {
        self.client
            .set_method_response(method, url, json_response(status, json));
        self
    }

    /// Configures an answer stream made of `chunks`.
    pub fn with_stream(self, url: &str, chunks: Vec<Bytes>) -> Self {
        self.client.set_response(url, MockResponse::Stream(chunks));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn json_response(status: u16, json: &str) -> MockResponse {
    MockResponse::Success(Response::new(status, Bytes::from(json.to_string())))
}

/// One untyped frame carrying `text` as its payload.
pub fn token_frame(text: &str) -> Bytes {
    Bytes::from(format!("data:{}\n\n", text))
}

/// One `conversationId` frame.
pub fn conversation_id_frame(id: &str) -> Bytes {
    Bytes::from(format!("event: conversationId\ndata:{}\n\n", id))
}

/// Transport failure used for mid-stream errors.
pub fn connection_reset() -> HttpError {
    HttpError::ConnectionFailed("connection reset".to_string())
}
