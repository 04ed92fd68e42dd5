//! Streaming UTF-8 decoder.
//!
//! Response bodies arrive in arbitrary chunks, so a multi-byte character can
//! straddle two reads. Decoding each chunk on its own would corrupt those
//! characters; this decoder carries the incomplete tail of one chunk over to
//! the next instead.

const REPLACEMENT: char = '\u{FFFD}';
const BOM: char = '\u{FEFF}';

/// Stateful, non-fatal UTF-8 decoder.
///
/// - Incomplete trailing sequences are held back until the next `decode`.
/// - Invalid sequences become U+FFFD.
/// - A leading byte-order mark is dropped.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    /// Bytes of a character that has not been completed yet (at most 3)
    pending: Vec<u8>,
    /// Whether any text has been produced yet (for BOM stripping)
    started: bool,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk of the stream.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(std::str::from_utf8(&rest[..valid]).unwrap_or_default());

                    match e.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            // Truncated sequence at the end: wait for more bytes
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }

        self.strip_bom(out)
    }

    /// Flush the decoder at end of stream.
    ///
    /// A sequence that never completed decodes to a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        self.pending.clear();
        self.strip_bom(REPLACEMENT.to_string())
    }

    /// Whether bytes of an unfinished character are buffered.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.started = false;
    }

    fn strip_bom(&mut self, mut text: String) -> String {
        if !self.started && !text.is_empty() {
            self.started = true;
            if text.starts_with(BOM) {
                text.drain(..BOM.len_utf8());
            }
        }
        text
    }
}
