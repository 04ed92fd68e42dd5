use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Entry of `GET /api/chat/sessions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub conversation_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
