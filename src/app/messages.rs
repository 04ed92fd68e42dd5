//! Messages from background tasks to the app loop.

use crate::sse::DispatchSummary;

/// Messages sent from async tasks to the main app loop.
///
/// Every stream message carries the generation of the send that produced it.
/// The app drops messages whose generation is not the current one, so events
/// queued by an aborted stream never reach the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// A token received during streaming
    StreamToken { generation: u64, token: String },
    /// The server assigned or confirmed the conversation id
    ConversationId { generation: u64, conversation_id: String },
    /// The stream ended cleanly
    StreamComplete {
        generation: u64,
        summary: DispatchSummary,
    },
    /// The request or the body read failed
    StreamError { generation: u64, error: String },
}

impl AppMessage {
    /// Generation of the send this message belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            AppMessage::StreamToken { generation, .. }
            | AppMessage::ConversationId { generation, .. }
            | AppMessage::StreamComplete { generation, .. }
            | AppMessage::StreamError { generation, .. } => *generation,
        }
    }

    /// Whether this message ends its stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppMessage::StreamComplete { .. } | AppMessage::StreamError { .. }
        )
    }
}
