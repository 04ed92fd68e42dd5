//! Sink abstraction for dispatched stream events.
//!
//! The dispatcher does not know where tokens end up. The app forwards them
//! over a channel; tests collect them into a `Vec`.

use crate::sse::ChatEvent;

/// Receiver of dispatched chat events, called in arrival order.
///
/// # Example
///
/// ```ignore
/// use ragchat::traits::StreamSink;
///
/// struct Printer;
///
/// impl StreamSink for Printer {
///     fn on_conversation_id(&mut self, id: &str) {
///         eprintln!("conversation: {}", id);
///     }
///     fn on_token(&mut self, text: &str) {
///         print!("{}", text);
///     }
/// }
/// ```
pub trait StreamSink {
    /// The server announced the conversation id for this exchange.
    ///
    /// Persisting it is the receiver's decision.
    fn on_conversation_id(&mut self, id: &str);

    /// Append a token to the message being rendered.
    fn on_token(&mut self, text: &str);

    /// Nobody is listening any more; the reader stops at the next frame.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Collects events as they are dispatched.
impl StreamSink for Vec<ChatEvent> {
    fn on_conversation_id(&mut self, id: &str) {
        self.push(ChatEvent::ConversationId(id.to_string()));
    }

    fn on_token(&mut self, text: &str) {
        self.push(ChatEvent::Token(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut sink: Vec<ChatEvent> = Vec::new();
        sink.on_token("a");
        sink.on_conversation_id("c1");
        sink.on_token("");
        assert_eq!(
            sink,
            vec![
                ChatEvent::Token("a".to_string()),
                ChatEvent::ConversationId("c1".to_string()),
                ChatEvent::Token(String::new()),
            ]
        );
    }
}
