//! Application state and logic.
//!
//! [`App`] owns the transcript, the active conversation id and the send
//! affordance. Long-running work (the answer stream) runs in a spawned task
//! that reports back through [`AppMessage`]s; every state change happens on
//! the app loop.

mod commands;
mod documents;
mod messages;
mod sessions;
mod stream;

pub use messages::AppMessage;

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{ChatApi, DocumentApi};
use crate::models::{ChatMessage, SessionSummary};
use crate::traits::{ChatView, ConversationStore, HttpClient};

/// Main application state.
pub struct App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    /// Chat endpoints
    pub chat: ChatApi<C>,
    /// Document endpoints
    pub documents: DocumentApi<C>,
    /// Where the active conversation id is persisted
    store: S,
    /// Rendering surface
    view: V,
    /// Active conversation id
    conversation_id: String,
    /// Messages of the active conversation; the open answer is last while sending
    transcript: Vec<ChatMessage>,
    /// Last fetched session list
    sessions: Vec<SessionSummary>,
    /// Whether an answer is streaming (send affordance disabled)
    sending: bool,
    /// Generation of the newest send; older stream messages are dropped
    generation: u64,
    /// Handle of the running stream task
    stream_task: Option<JoinHandle<()>>,
    /// Hold lines that arrive while sending instead of cancelling the answer
    queue_input: bool,
    /// Lines held back by `queue_input`, oldest first
    queued: VecDeque<String>,
    /// Flag to indicate the app should quit
    pub should_quit: bool,
    /// Receiver for async messages; taken by the main loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender handed to spawned tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
}

impl<C, S, V> App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    /// Create a new App. Call [`App::start`] before handling input.
    pub fn new(chat: ChatApi<C>, documents: DocumentApi<C>, store: S, view: V) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        Self {
            chat,
            documents,
            store,
            view,
            conversation_id: String::new(),
            transcript: Vec::new(),
            sessions: Vec::new(),
            sending: false,
            generation: 0,
            stream_task: None,
            queue_input: false,
            queued: VecDeque::new(),
            should_quit: false,
            message_rx: Some(message_rx),
            message_tx,
        }
    }

    /// Active conversation id.
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    /// Messages of the active conversation.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Last fetched session list.
    pub fn sessions(&self) -> &[SessionSummary] {
        &self.sessions
    }

    /// Whether an answer is currently streaming.
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Lines waiting for the current answer to finish.
    pub fn queued_input(&self) -> usize {
        self.queued.len()
    }

    /// Queue lines typed while an answer streams rather than cancelling it.
    ///
    /// Used for piped input, where lines arrive faster than answers.
    pub fn set_queue_input(&mut self, enabled: bool) {
        self.queue_input = enabled;
    }

    /// Generation of the newest send.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the active id, logging instead of failing.
    fn persist_conversation_id(&self) {
        if let Err(e) = self.store.save(&self.conversation_id) {
            tracing::warn!("could not persist conversation id: {}", e);
        }
    }
}

impl<C, S, V> Drop for App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    fn drop(&mut self) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
    }
}
