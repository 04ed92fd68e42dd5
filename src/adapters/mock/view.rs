//! Recording chat view for testing.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::models::{ChatMessage, DocumentDetail, DocumentSummary, SessionSummary};
use crate::traits::ChatView;

/// One call made on a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Message(ChatMessage),
    BeginAnswer,
    Token(String),
    ReplaceAnswer(String),
    EndAnswer,
    Scroll,
    Clear,
    InputEnabled(bool),
    Sessions {
        ids: Vec<String>,
        active_id: String,
    },
    Documents(Vec<Uuid>),
    Document(Uuid),
    Notice(String),
}

#[derive(Debug, Default)]
struct ViewState {
    events: Vec<ViewEvent>,
    /// Rendered transcript; the last entry is the open answer while streaming
    transcript: Vec<ChatMessage>,
    answer_open: bool,
    input_enabled: bool,
}

/// Chat view that records every call.
///
/// Clones share state, so a test can keep a handle after moving the view
/// into the app.
#[derive(Debug, Clone)]
pub struct RecordingView {
    state: Arc<Mutex<ViewState>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState {
                input_enabled: true,
                ..ViewState::default()
            })),
        }
    }

    /// Every recorded call, oldest first.
    pub fn events(&self) -> Vec<ViewEvent> {
        self.state.lock().unwrap().events.clone()
    }

    /// Messages currently rendered.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state.lock().unwrap().transcript.clone()
    }

    /// Content of the newest rendered message.
    pub fn last_content(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .transcript
            .last()
            .map(|m| m.content.clone())
    }

    /// Whether the send affordance is enabled.
    pub fn input_enabled(&self) -> bool {
        self.state.lock().unwrap().input_enabled
    }

    /// Every notice shown so far.
    pub fn notices(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Notice(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&self) {
        self.state.lock().unwrap().events.clear();
    }

    fn record(&self, event: ViewEvent) {
        self.state.lock().unwrap().events.push(event);
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatView for RecordingView {
    fn show_message(&mut self, message: &ChatMessage) {
        let mut state = self.state.lock().unwrap();
        state.transcript.push(message.clone());
        state.events.push(ViewEvent::Message(message.clone()));
    }

    fn begin_answer(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.transcript.push(ChatMessage::bot(""));
        state.answer_open = true;
        state.events.push(ViewEvent::BeginAnswer);
    }

    fn append_token(&mut self, text: &str) {
        let mut state = self.state.lock().unwrap();
        if state.answer_open {
            if let Some(last) = state.transcript.last_mut() {
                last.content.push_str(text);
            }
        }
        state.events.push(ViewEvent::Token(text.to_string()));
    }

    fn replace_answer(&mut self, text: &str) {
        let mut state = self.state.lock().unwrap();
        if state.answer_open {
            if let Some(last) = state.transcript.last_mut() {
                last.content = text.to_string();
            }
        }
        state.events.push(ViewEvent::ReplaceAnswer(text.to_string()));
    }

    fn end_answer(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.answer_open = false;
        state.events.push(ViewEvent::EndAnswer);
    }

    fn scroll_to_latest(&mut self) {
        self.record(ViewEvent::Scroll);
    }

    fn clear(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.transcript.clear();
        state.answer_open = false;
        state.events.push(ViewEvent::Clear);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        let mut state = self.state.lock().unwrap();
        state.input_enabled = enabled;
        state.events.push(ViewEvent::InputEnabled(enabled));
    }

    fn show_sessions(&mut self, sessions: &[SessionSummary], active_id: &str) {
        self.record(ViewEvent::Sessions {
            ids: sessions.iter().map(|s| s.conversation_id.clone()).collect(),
            active_id: active_id.to_string(),
        });
    }

    fn show_documents(&mut self, documents: &[DocumentSummary]) {
        self.record(ViewEvent::Documents(
            documents.iter().map(|d| d.document_id).collect(),
        ));
    }

    fn show_document(&mut self, document: &DocumentDetail) {
        self.record(ViewEvent::Document(document.document_id));
    }

    fn show_notice(&mut self, text: &str) {
        self.record(ViewEvent::Notice(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streamed_answer_accumulates() {
        let mut view = RecordingView::new();
        view.show_message(&ChatMessage::user("hi"));
        view.begin_answer();
        view.append_token("Hel");
        view.append_token("lo");
        view.end_answer();

        assert_eq!(view.transcript().len(), 2);
        assert_eq!(view.last_content(), Some("Hello".to_string()));
    }

    #[test]
    fn test_replace_answer() {
        let mut view = RecordingView::new();
        view.begin_answer();
        view.append_token("partial");
        view.replace_answer("failed");

        assert_eq!(view.last_content(), Some("failed".to_string()));
    }

    #[test]
    fn test_tokens_after_end_do_not_mutate_transcript() {
        let mut view = RecordingView::new();
        view.begin_answer();
        view.end_answer();
        view.append_token("late");

        assert_eq!(view.last_content(), Some(String::new()));
    }

    #[test]
    fn test_input_enabled_tracking() {
        let mut view = RecordingView::new();
        assert!(view.input_enabled());

        view.set_input_enabled(false);
        assert!(!view.input_enabled());
    }

    #[test]
    fn test_clone_shares_state() {
        let view = RecordingView::new();
        let mut moved = view.clone();
        moved.show_notice("saved");

        assert_eq!(view.notices(), vec!["saved".to_string()]);
    }
}
