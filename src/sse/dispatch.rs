//! Event dispatch: frames in, sink calls out.

use futures::Stream;
use futures_util::StreamExt;
use tracing::{debug, trace};

use crate::error::StreamError;
use crate::sse::events::ChatEvent;
use crate::sse::parser::parse_frame;
use crate::sse::reader::frame_stream;
use crate::traits::StreamSink;

/// Counters for one completed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub frames: usize,
    pub tokens: usize,
    pub conversation_id_updates: usize,
}

/// Applies parsed events to a [`StreamSink`] and tracks the conversation id.
///
/// The current id goes in at construction; every `conversationId` event
/// replaces it and is reported to the sink so the caller can persist it.
#[derive(Debug, Clone)]
pub struct StreamDispatcher {
    conversation_id: String,
    summary: DispatchSummary,
}

impl StreamDispatcher {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            summary: DispatchSummary::default(),
        }
    }

    /// Conversation id after the events dispatched so far.
    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub fn summary(&self) -> DispatchSummary {
        self.summary
    }

    /// Dispatch every event of one complete frame, in line order.
    pub fn dispatch_frame<K>(&mut self, frame: &str, sink: &mut K)
    where
        K: StreamSink + ?Sized,
    {
        self.summary.frames += 1;
        let events = parse_frame(frame);
        trace!(events = events.len(), "frame");

        for event in events {
            match event.kind() {
                ChatEvent::ConversationId(id) => {
                    debug!(conversation_id = %id, "conversation id updated");
                    self.summary.conversation_id_updates += 1;
                    sink.on_conversation_id(&id);
                    self.conversation_id = id;
                }
                ChatEvent::Token(text) => {
                    self.summary.tokens += 1;
                    sink.on_token(&text);
                }
            }
        }
    }
}

/// Read a byte stream to the end, dispatching frames as they complete.
///
/// Returns the summary on a clean end of stream, or as soon as the sink
/// reports itself closed. A source error stops the read immediately; events
/// dispatched before it are not rolled back.
pub async fn pump<S, B, E, K>(
    source: S,
    dispatcher: &mut StreamDispatcher,
    sink: &mut K,
) -> Result<DispatchSummary, StreamError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
    K: StreamSink + ?Sized,
{
    let frames = frame_stream(source);
    futures_util::pin_mut!(frames);

    while let Some(frame) = frames.next().await {
        let frame = frame.map_err(|e| StreamError::failed(e.to_string()))?;
        dispatcher.dispatch_frame(&frame, sink);
        if sink.is_closed() {
            debug!("sink closed, abandoning stream");
            break;
        }
    }

    Ok(dispatcher.summary())
}
