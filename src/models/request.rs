use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/stream`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The question, already trimmed
    pub question: String,
    /// Conversation the question belongs to
    pub conversation_id: String,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            conversation_id: conversation_id.into(),
        }
    }
}
