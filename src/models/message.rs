use serde::{Deserialize, Serialize};

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    System,
}

impl Role {
    /// Map a history role string. Anything that is not `user` or `system`
    /// (e.g. `assistant`) is the bot.
    pub fn from_wire(role: &str) -> Self {
        match role {
            "user" => Role::User,
            "system" => Role::System,
            _ => Role::Bot,
        }
    }

    /// Label shown in front of a message
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Bot => "assistant",
            Role::System => "system",
        }
    }
}

/// A message in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content)
    }
}

/// Entry of `GET /api/chat/history`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl From<HistoryMessage> for ChatMessage {
    fn from(message: HistoryMessage) -> Self {
        ChatMessage::new(Role::from_wire(&message.role), message.content)
    }
}
