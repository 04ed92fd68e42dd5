//! SSE stream parsing logic
//!
//! Contains the frame splitter and the functions that turn one frame into
//! its ordered list of events.

mod frame;

pub use frame::{FrameSplitter, FRAME_DELIMITER};

use crate::sse::events::{SseEvent, SseLine};

const EVENT_PREFIX: &str = "event:";
const DATA_PREFIX: &str = "data:";

/// Parse a single SSE line into its component type
///
/// The event type is trimmed; the data payload is not. `data: x` therefore
/// carries the payload `" x"`.
pub fn parse_sse_line(line: &str) -> SseLine {
    if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
        return SseLine::Data(rest.to_string());
    }

    SseLine::Ignored
}

/// Parse one complete frame into the events it carries, in line order.
///
/// Carriage returns are removed before the frame is split into lines. Every
/// `data:` line yields one event tagged with the event type current at that
/// point; the type starts out empty for each frame. A frame without `data:`
/// lines yields nothing.
pub fn parse_frame(frame: &str) -> Vec<SseEvent> {
    let normalized = frame.replace('\r', "");
    let mut event_type = String::new();
    let mut events = Vec::new();

    for line in normalized.split('\n') {
        match parse_sse_line(line) {
            SseLine::Event(t) => event_type = t,
            SseLine::Data(data) => events.push(SseEvent::new(event_type.clone(), data)),
            SseLine::Ignored => {}
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests for parse_sse_line

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_sse_line("event: conversationId"),
            SseLine::Event("conversationId".to_string())
        );
        assert_eq!(
            parse_sse_line("event:conversationId"),
            SseLine::Event("conversationId".to_string())
        );
        assert_eq!(
            parse_sse_line("event:   token  "),
            SseLine::Event("token".to_string())
        );
    }

    #[test]
    fn test_parse_data_line_keeps_leading_space() {
        assert_eq!(parse_sse_line("data: hello"), SseLine::Data(" hello".to_string()));
        assert_eq!(parse_sse_line("data:hello"), SseLine::Data("hello".to_string()));
        assert_eq!(parse_sse_line("data:  x  "), SseLine::Data("  x  ".to_string()));
    }

    #[test]
    fn test_parse_empty_data_line() {
        assert_eq!(parse_sse_line("data:"), SseLine::Data(String::new()));
    }

    #[test]
    fn test_parse_other_lines_ignored() {
        assert_eq!(parse_sse_line(""), SseLine::Ignored);
        assert_eq!(parse_sse_line(": keep-alive"), SseLine::Ignored);
        assert_eq!(parse_sse_line("id: 7"), SseLine::Ignored);
        assert_eq!(parse_sse_line(" data: indented"), SseLine::Ignored);
        assert_eq!(parse_sse_line("DATA:x"), SseLine::Ignored);
    }

    // Tests for parse_frame

    #[test]
    fn test_frame_with_conversation_id() {
        let events = parse_frame("event: conversationId\ndata:abc123");
        assert_eq!(events, vec![SseEvent::new("conversationId", "abc123")]);
    }

    #[test]
    fn test_frame_with_two_data_lines() {
        let events = parse_frame("data:Hello\ndata:, world");
        assert_eq!(
            events,
            vec![SseEvent::token("Hello"), SseEvent::token(", world")]
        );
    }

    #[test]
    fn test_frame_strips_carriage_returns() {
        let events = parse_frame("event: conversationId\r\ndata:a\rb\r");
        assert_eq!(events, vec![SseEvent::new("conversationId", "ab")]);
    }

    #[test]
    fn test_frame_without_data_is_ignored() {
        assert!(parse_frame("event: conversationId").is_empty());
        assert!(parse_frame(": comment").is_empty());
        assert!(parse_frame("").is_empty());
    }

    #[test]
    fn test_event_type_applies_to_following_lines_only() {
        let events = parse_frame("data:first\nevent: conversationId\ndata:id-1");
        assert_eq!(
            events,
            vec![
                SseEvent::token("first"),
                SseEvent::new("conversationId", "id-1"),
            ]
        );
    }

    #[test]
    fn test_leading_newline_in_frame() {
        // "a\n\n\nb" splits into "a" and "\nb"; the blank line is ignored
        assert_eq!(parse_frame("\ndata:b"), vec![SseEvent::token("b")]);
    }
}
