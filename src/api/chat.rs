//! Chat endpoints: answer stream, session list, history, session delete.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{check_status, endpoint};
use crate::error::ApiResult;
use crate::models::{ChatRequest, HistoryMessage, SessionSummary};
use crate::traits::{json_headers, ByteStream, Headers, HttpClient, HttpError};

/// Client for `/api/chat/*`.
///
/// Cheap to clone; clones share the underlying HTTP client.
pub struct ChatApi<C: HttpClient> {
    /// Base URL for the chat server
    pub base_url: String,
    client: Arc<C>,
}

impl<C: HttpClient> Clone for ChatApi<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> ChatApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self::with_shared_client(base_url, Arc::new(client))
    }

    /// Build on an HTTP client shared with other API clients.
    pub fn with_shared_client(base_url: impl Into<String>, client: Arc<C>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Open the answer stream for a question.
    ///
    /// Sends `POST /api/chat/stream` with `{question, conversationId}` and
    /// returns the raw response body. A non-2xx status is an error.
    pub async fn stream(&self, request: &ChatRequest) -> Result<ByteStream, HttpError> {
        let url = endpoint(&self.base_url, "/api/chat/stream");
        let body = serde_json::to_string(request).map_err(|e| HttpError::Other(e.to_string()))?;

        debug!("POST {} (conversation {})", url, request.conversation_id);
        self.client.post_stream(&url, &body, &json_headers()).await
    }

    /// List conversations, newest first as the server orders them.
    ///
    /// A non-2xx status yields an empty list.
    pub async fn sessions(&self) -> ApiResult<Vec<SessionSummary>> {
        let url = endpoint(&self.base_url, "/api/chat/sessions");
        let response = self.client.get(&url, &Headers::new()).await?;

        if !response.is_success() {
            warn!("session list returned status {}", response.status);
            return Ok(Vec::new());
        }

        Ok(response.json()?)
    }

    /// Fetch the stored messages of a conversation.
    pub async fn history(&self, conversation_id: &str) -> ApiResult<Vec<HistoryMessage>> {
        let url = endpoint(
            &self.base_url,
            &format!(
                "/api/chat/history?conversationId={}",
                urlencoding::encode(conversation_id)
            ),
        );
        let response = self.client.get(&url, &Headers::new()).await?;
        check_status(&response)?;

        Ok(response.json()?)
    }

    /// Delete a conversation and its history.
    pub async fn delete_session(&self, conversation_id: &str) -> ApiResult<()> {
        let url = endpoint(
            &self.base_url,
            &format!("/api/chat/sessions/{}", urlencoding::encode(conversation_id)),
        );
        let response = self.client.delete(&url, &Headers::new()).await?;
        check_status(&response)
    }
}
