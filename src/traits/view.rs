//! Chat view trait abstraction.
//!
//! The app never writes to the terminal directly; it drives a [`ChatView`].
//! Production uses [`crate::adapters::TerminalView`], tests use
//! [`crate::adapters::mock::RecordingView`].

use crate::models::{ChatMessage, DocumentDetail, DocumentSummary, SessionSummary};

/// Rendering surface for the chat client.
///
/// Methods are infallible; a view that hits an IO error logs it.
pub trait ChatView: Send {
    /// Render a complete message (user input, replayed history).
    fn show_message(&mut self, message: &ChatMessage);

    /// Open an empty assistant message that tokens will stream into.
    fn begin_answer(&mut self);

    /// Append a token to the open assistant message.
    fn append_token(&mut self, text: &str);

    /// Replace the open assistant message's content entirely.
    fn replace_answer(&mut self, text: &str);

    /// Close the open assistant message.
    fn end_answer(&mut self);

    /// Bring the newest content into view.
    fn scroll_to_latest(&mut self);

    /// Remove every rendered message.
    fn clear(&mut self);

    /// Enable or disable the send affordance.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Render the session list, marking the active conversation.
    fn show_sessions(&mut self, sessions: &[SessionSummary], active_id: &str);

    /// Render the document table.
    fn show_documents(&mut self, documents: &[DocumentSummary]);

    /// Render one document in full.
    fn show_document(&mut self, document: &DocumentDetail);

    /// Short status line (confirmations, validation errors, help).
    fn show_notice(&mut self, text: &str);
}
