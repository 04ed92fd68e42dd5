//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE, multipart, streaming)
//! - [`ConversationStore`] - Persistence of the active conversation id
//! - [`StreamSink`] - Receiver of dispatched stream events
//! - [`ChatView`] - Terminal rendering of the transcript

pub mod http;
pub mod sse;
pub mod store;
pub mod view;

pub use http::{
    json_headers, ByteStream, FilePart, Headers, HttpClient, HttpError, MultipartForm, Response,
};
pub use sse::StreamSink;
pub use store::{ConversationStore, StoreError};
pub use view::ChatView;
