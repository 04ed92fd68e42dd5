//! Conversation lifecycle: startup restore, new chat, switch, delete, history.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::App;
use crate::models::ChatMessage;
use crate::traits::{ChatView, ConversationStore, HttpClient};

impl<C, S, V> App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    /// Restore the stored conversation (or start a new one), replay its
    /// history and fetch the session list.
    ///
    /// With `force_new` the stored id is ignored and replaced.
    pub async fn start(&mut self, force_new: bool) {
        let restored = if force_new {
            None
        } else {
            match self.store.load() {
                Ok(id) => id,
                Err(e) => {
                    warn!("could not load conversation id: {}", e);
                    None
                }
            }
        };

        match restored {
            Some(id) => {
                info!(conversation_id = %id, "resuming conversation");
                self.conversation_id = id;
                self.load_history().await;
            }
            None => {
                self.conversation_id = Uuid::new_v4().to_string();
                info!(conversation_id = %self.conversation_id, "new conversation");
                self.persist_conversation_id();
            }
        }

        self.refresh_sessions().await;
    }

    /// Clear the transcript and start a fresh conversation.
    pub async fn new_chat(&mut self) {
        self.cancel_stream();
        self.transcript.clear();
        self.view.clear();

        self.conversation_id = Uuid::new_v4().to_string();
        info!(conversation_id = %self.conversation_id, "new conversation");
        self.persist_conversation_id();

        self.refresh_sessions().await;
    }

    /// Make `conversation_id` active and replay its history.
    pub async fn switch_session(&mut self, conversation_id: &str) {
        self.cancel_stream();
        self.transcript.clear();
        self.view.clear();

        self.conversation_id = conversation_id.to_string();
        info!(conversation_id, "switched conversation");
        self.persist_conversation_id();

        self.load_history().await;
        self.refresh_sessions().await;
    }

    /// Delete a conversation on the server.
    ///
    /// Whether or not the server accepted it, a deleted active conversation
    /// is replaced by a new one and the session list is re-fetched.
    pub async fn delete_session(&mut self, conversation_id: &str) {
        match self.chat.delete_session(conversation_id).await {
            Ok(()) => self
                .view
                .show_notice(&format!("Deleted conversation {}.", conversation_id)),
            Err(e) => {
                warn!("could not delete conversation {}: {}", conversation_id, e);
                self.view.show_notice(&e.user_message());
            }
        }

        if conversation_id == self.conversation_id {
            self.new_chat().await;
        } else {
            self.refresh_sessions().await;
        }
    }

    /// Re-fetch the session list. Failures keep the previous list.
    pub async fn refresh_sessions(&mut self) {
        match self.chat.sessions().await {
            Ok(sessions) => {
                debug!(count = sessions.len(), "sessions refreshed");
                self.sessions = sessions;
            }
            Err(e) => warn!("could not load sessions: {}", e),
        }
    }

    /// Fetch and render the session list, marking the active conversation.
    pub async fn show_sessions(&mut self) {
        self.refresh_sessions().await;
        self.view.show_sessions(&self.sessions, &self.conversation_id);
    }

    /// Replay the active conversation's stored messages. Failures are logged.
    async fn load_history(&mut self) {
        let history = match self.chat.history(&self.conversation_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!("could not load history for {}: {}", self.conversation_id, e);
                return;
            }
        };

        for entry in history {
            let message = ChatMessage::from(entry);
            self.view.show_message(&message);
            self.transcript.push(message);
        }
        self.view.scroll_to_latest();
    }
}
