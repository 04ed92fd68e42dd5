//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions,
//! enabling tests without network or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryConversationStore`] - In-memory conversation id storage
//! - [`RecordingView`] - Chat view that records calls

pub mod http;
pub mod store;
pub mod view;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use store::InMemoryConversationStore;
pub use view::{RecordingView, ViewEvent};
