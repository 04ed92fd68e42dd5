//! Common test utilities for integration tests.
//!
//! Builds an [`App`] wired to the in-memory adapters and drives its message
//! loop the way `main` does.
//!
//! # Example
//!
//! ```ignore
//! let harness = TestHarness::new();
//! harness.http.set_response(&stream_url(), MockResponse::Stream(vec![token_frame("hi")]));
//! let (mut app, mut rx) = harness.build();
//! app.submit_question("hello");
//! drain_stream(&mut app, &mut rx).await;
//! ```

#![allow(dead_code, unused_imports)]

pub mod mocks;

pub use mocks::*;

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use ragchat::api::{ChatApi, DocumentApi};
use ragchat::app::{App, AppMessage};

/// Base URL every test client points at.
pub const BASE_URL: &str = "http://localhost:8080";

/// How long a test waits for stream messages before giving up.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

pub type TestApp = App<MockHttpClient, InMemoryConversationStore, RecordingView>;

pub fn stream_url() -> String {
    format!("{}/api/chat/stream", BASE_URL)
}

pub fn sessions_url() -> String {
    format!("{}/api/chat/sessions", BASE_URL)
}

pub fn history_url(conversation_id: &str) -> String {
    format!(
        "{}/api/chat/history?conversationId={}",
        BASE_URL, conversation_id
    )
}

pub fn documents_url() -> String {
    format!("{}/api/documents", BASE_URL)
}

/// Mocks plus handles that stay valid after the app takes ownership.
pub struct TestHarness {
    pub http: MockHttpClient,
    pub store: InMemoryConversationStore,
    pub view: RecordingView,
}

impl TestHarness {
    /// Harness with an empty session list and an empty store.
    pub fn new() -> Self {
        Self::with_store(InMemoryConversationStore::new())
    }

    pub fn with_store(store: InMemoryConversationStore) -> Self {
        let http = MockHttpConfig::new()
            .with_json_response(&sessions_url(), 200, "[]")
            .build();
        Self {
            http,
            store,
            view: RecordingView::new(),
        }
    }

    /// Build the app and take its message receiver.
    pub fn build(&self) -> (TestApp, UnboundedReceiver<AppMessage>) {
        let chat = ChatApi::new(BASE_URL, self.http.clone());
        let documents = DocumentApi::new(BASE_URL, self.http.clone());
        let mut app = App::new(chat, documents, self.store.clone(), self.view.clone());
        let rx = app
            .message_rx
            .take()
            .expect("message receiver is present on a fresh app");
        (app, rx)
    }

    /// Build the app and run its startup.
    pub async fn start(&self) -> (TestApp, UnboundedReceiver<AppMessage>) {
        let (mut app, rx) = self.build();
        app.start(false).await;
        (app, rx)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed stream messages to the app until the current send finishes.
pub async fn drain_stream(app: &mut TestApp, rx: &mut UnboundedReceiver<AppMessage>) {
    while app.is_sending() {
        let message = tokio::time::timeout(MESSAGE_TIMEOUT, rx.recv())
            .await
            .expect("timed out waiting for a stream message")
            .expect("message channel closed");
        app.handle_message(message).await;
    }
}

/// Feed stream messages until `count` tokens of the current send are applied.
pub async fn drain_tokens(
    app: &mut TestApp,
    rx: &mut UnboundedReceiver<AppMessage>,
    count: usize,
) {
    let mut seen = 0;
    while seen < count {
        let message = tokio::time::timeout(MESSAGE_TIMEOUT, rx.recv())
            .await
            .expect("timed out waiting for a token")
            .expect("message channel closed");
        if matches!(message, AppMessage::StreamToken { .. }) {
            seen += 1;
        }
        app.handle_message(message).await;
    }
}
