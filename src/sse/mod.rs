//! SSE (Server-Sent Events) stream parser
//!
//! Parses the answer stream of `POST /api/chat/stream`. The format is a
//! reduced SSE dialect:
//! - Frames are separated by `\n\n`
//! - `event: <type>` - sets the type for the following `data:` lines of the frame
//! - `data:<payload>` - one event per line; the payload is everything after
//!   the colon, including a leading space
//! - Every other line is ignored
//!
//! # Module structure
//! - `events` - Line and event types (SseLine, SseEvent, ChatEvent)
//! - `decoder` - Stateful UTF-8 decoding across chunk boundaries
//! - `parser` - Frame splitting and per-frame parsing
//! - `reader` - Pull-based frame iteration over sync or async byte sources
//! - `dispatch` - Applying events to a sink, plus the async read loop

mod decoder;
mod dispatch;
mod events;
mod parser;
mod reader;

// Re-export public types
pub use decoder::Utf8StreamDecoder;
pub use dispatch::{pump, DispatchSummary, StreamDispatcher};
pub use events::{ChatEvent, SseEvent, SseLine, CONVERSATION_ID_EVENT};
pub use parser::{parse_frame, parse_sse_line, FrameSplitter, FRAME_DELIMITER};
pub use reader::{frame_stream, FrameAssembler, FrameReader};
