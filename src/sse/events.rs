//! SSE event types and definitions
//!
//! Contains the line classification produced by the parser, the raw
//! `(event_type, data)` pair carried by each `data:` line, and the typed
//! chat event the dispatcher acts on.

/// Event type that carries a conversation id instead of a token.
pub const CONVERSATION_ID_EVENT: &str = "conversationId";

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: conversationId"), trimmed
    Event(String),
    /// Data payload, everything after `data:` with no trimming
    Data(String),
    /// Anything else (blank lines, comments, unknown fields)
    Ignored,
}

/// One dispatched unit: a `data:` line together with the event type that was
/// current in its frame when the line was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Empty when the frame declared no `event:` line
    pub event_type: String,
    pub data: String,
}

impl SseEvent {
    pub fn new(event_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: data.into(),
        }
    }

    /// Shorthand for an untyped (token) event.
    pub fn token(data: impl Into<String>) -> Self {
        Self::new(String::new(), data)
    }

    /// Classify this event for the dispatcher.
    ///
    /// Only `conversationId` is special; an empty or any other event type is
    /// a token to append to the message being rendered.
    pub fn kind(&self) -> ChatEvent {
        if self.event_type == CONVERSATION_ID_EVENT {
            ChatEvent::ConversationId(self.data.clone())
        } else {
            ChatEvent::Token(self.data.clone())
        }
    }
}

/// Typed events from the chat stream endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Server assigned (or confirmed) the conversation id
    ConversationId(String),
    /// Incremental fragment of the assistant's answer
    Token(String),
}

impl ChatEvent {
    /// Get the event type name as a string (for logging)
    pub fn event_type_name(&self) -> &'static str {
        match self {
            ChatEvent::ConversationId(_) => "conversation_id",
            ChatEvent::Token(_) => "token",
        }
    }
}
