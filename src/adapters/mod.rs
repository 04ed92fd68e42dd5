//! Concrete implementations of trait abstractions.
//!
//! This module provides production adapters for the traits defined in
//! `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileConversationStore`] - Conversation id kept in the state directory
//! - [`TerminalView`] - Line-based terminal rendering
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses and chunk streams
//! - [`mock::InMemoryConversationStore`] - In-memory id storage with failure injection
//! - [`mock::RecordingView`] - Records every view call

pub mod file_store;
pub mod mock;
pub mod reqwest_http;
pub mod terminal_view;

pub use file_store::FileConversationStore;
pub use mock::{InMemoryConversationStore, MockHttpClient, RecordingView};
pub use reqwest_http::ReqwestHttpClient;
pub use terminal_view::TerminalView;
