//! Wire and transcript types.

mod document;
mod message;
mod request;
mod session;

pub use document::{
    display_category, normalize_category, DocumentDetail, DocumentSummary, IngestRequest,
    IngestResponse,
};
pub use message::{ChatMessage, HistoryMessage, Role};
pub use request::ChatRequest;
pub use session::SessionSummary;
