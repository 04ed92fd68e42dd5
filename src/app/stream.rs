//! Question submission and answer stream handling for the App.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{App, AppMessage};
use crate::api::ChatApi;
use crate::error::{StreamError, STREAM_FAILURE_MESSAGE};
use crate::models::{ChatMessage, ChatRequest};
use crate::sse::{pump, StreamDispatcher};
use crate::traits::{ChatView, ConversationStore, HttpClient, StreamSink};

/// Forwards dispatched events to the app loop, tagged with their send.
///
/// Closes once a send fails, which happens when the app loop has gone.
struct ChannelSink {
    generation: u64,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    closed: bool,
}

impl ChannelSink {
    fn forward(&mut self, message: AppMessage) {
        if self.message_tx.send(message).is_err() {
            debug!(generation = self.generation, "app loop gone");
            self.closed = true;
        }
    }
}

impl StreamSink for ChannelSink {
    fn on_conversation_id(&mut self, id: &str) {
        self.forward(AppMessage::ConversationId {
            generation: self.generation,
            conversation_id: id.to_string(),
        });
    }

    fn on_token(&mut self, text: &str) {
        self.forward(AppMessage::StreamToken {
            generation: self.generation,
            token: text.to_string(),
        });
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Body of the spawned stream task.
async fn run_stream<C: HttpClient>(
    chat: ChatApi<C>,
    request: ChatRequest,
    generation: u64,
    message_tx: mpsc::UnboundedSender<AppMessage>,
) {
    let mut dispatcher = StreamDispatcher::new(request.conversation_id.clone());
    let mut sink = ChannelSink {
        generation,
        message_tx,
        closed: false,
    };

    let result = match chat.stream(&request).await {
        Ok(body) => pump(body, &mut dispatcher, &mut sink).await,
        Err(e) => Err(StreamError::from(e)),
    };

    let message = match result {
        Ok(summary) => AppMessage::StreamComplete {
            generation,
            summary,
        },
        Err(e) => AppMessage::StreamError {
            generation,
            error: e.to_string(),
        },
    };
    if !sink.is_closed() {
        sink.forward(message);
    }
}

impl<C, S, V> App<C, S, V>
where
    C: HttpClient + 'static,
    S: ConversationStore,
    V: ChatView,
{
    /// Send a question and start streaming its answer.
    ///
    /// Blank input is ignored. A question sent while another answer is still
    /// streaming aborts that stream first; its answer keeps whatever text had
    /// arrived.
    pub fn submit_question(&mut self, input: &str) {
        let question = input.trim();
        if question.is_empty() {
            return;
        }

        self.cancel_stream();

        self.generation += 1;
        let generation = self.generation;

        let user_message = ChatMessage::user(question);
        self.view.show_message(&user_message);
        self.transcript.push(user_message);
        self.transcript.push(ChatMessage::bot(""));
        self.view.begin_answer();
        self.view.scroll_to_latest();

        self.sending = true;
        self.view.set_input_enabled(false);

        info!(generation, conversation_id = %self.conversation_id, "sending question");

        let request = ChatRequest::new(question, self.conversation_id.clone());
        let chat = self.chat.clone();
        let message_tx = self.message_tx.clone();

        self.stream_task = Some(tokio::spawn(run_stream(
            chat, request, generation, message_tx,
        )));
    }

    /// Abort the running stream, if any, and close its answer.
    ///
    /// Messages it already queued are dropped by generation in
    /// [`App::handle_message`]. The caller decides when to offer the prompt
    /// again.
    pub fn cancel_stream(&mut self) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
        if self.sending {
            info!(generation = self.generation, "stream cancelled");
            self.sending = false;
            self.view.end_answer();
        }
    }

    /// Apply a message from a stream task.
    pub async fn handle_message(&mut self, message: AppMessage) {
        if message.generation() != self.generation || !self.sending {
            debug!(
                generation = message.generation(),
                current = self.generation,
                "dropping stale stream message"
            );
            return;
        }

        match message {
            AppMessage::StreamToken { token, .. } => {
                if let Some(answer) = self.transcript.last_mut() {
                    answer.content.push_str(&token);
                }
                self.view.append_token(&token);
                self.view.scroll_to_latest();
            }
            AppMessage::ConversationId {
                conversation_id, ..
            } => {
                self.conversation_id = conversation_id;
                self.persist_conversation_id();
            }
            AppMessage::StreamComplete { summary, .. } => {
                info!(
                    frames = summary.frames,
                    tokens = summary.tokens,
                    "stream complete"
                );
                self.finish_stream().await;
            }
            AppMessage::StreamError { error, .. } => {
                warn!("stream failed: {}", error);
                if let Some(answer) = self.transcript.last_mut() {
                    answer.content = STREAM_FAILURE_MESSAGE.to_string();
                }
                self.view.replace_answer(STREAM_FAILURE_MESSAGE);
                self.finish_stream().await;
            }
        }
    }

    /// Cleanup shared by success and failure, then any queued input.
    async fn finish_stream(&mut self) {
        self.stream_task = None;
        self.sending = false;
        self.view.end_answer();
        self.view.set_input_enabled(true);
        self.refresh_sessions().await;
        self.run_queued().await;
    }
}
