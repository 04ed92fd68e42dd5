//! Frame splitting over decoded stream text.

/// Separator between frames on the wire.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Accumulates decoded text and cuts it into complete frames.
///
/// Whatever follows the last delimiter stays buffered, so a frame that is
/// only partially received is never emitted and never lost.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    buffer: String,
    /// Byte offset up to which `buffer` is known to hold no delimiter
    scan_from: usize,
}

impl FrameSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text and return the frames it completed, in order.
    ///
    /// Empty frames (e.g. from `"\n\n\n\n"`) are returned as empty strings.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.buffer.push_str(text);

        let mut frames = Vec::new();
        let mut start = self.scan_from;
        while let Some(offset) = self.buffer[start..].find(FRAME_DELIMITER) {
            let end = start + offset;
            frames.push(self.buffer[..end].to_string());
            self.buffer.drain(..end + FRAME_DELIMITER.len());
            start = 0;
        }

        // A trailing '\n' may be the first half of a delimiter
        self.scan_from = if self.buffer.ends_with('\n') {
            self.buffer.len() - 1
        } else {
            self.buffer.len()
        };

        frames
    }

    /// Text received after the last complete frame.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop buffered text (used when a stream ends or a new one starts).
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.scan_from = 0;
    }
}
