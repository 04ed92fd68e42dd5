//! Pull-based frame reading over a chunked byte source.
//!
//! [`FrameReader`] wraps any iterator of byte chunks and yields complete
//! frames lazily; [`frame_stream`] does the same for an async byte stream
//! such as an HTTP response body. Both share [`FrameAssembler`], which owns
//! the decoder state and the stream buffer for exactly one read.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use futures::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::debug;

use crate::sse::decoder::Utf8StreamDecoder;
use crate::sse::parser::FrameSplitter;

/// Decoder + splitter pair for a single stream read.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    decoder: Utf8StreamDecoder,
    splitter: FrameSplitter,
    ready: VecDeque<String>,
    finished: bool,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk and queue the frames it completes.
    pub fn feed(&mut self, chunk: &[u8]) {
        let text = self.decoder.decode(chunk);
        self.ready.extend(self.splitter.push(&text));
    }

    /// Mark the source as exhausted.
    ///
    /// No further frame can complete, so buffered text is dropped.
    pub fn finish(&mut self) {
        if !self.splitter.is_empty() || self.decoder.has_pending() {
            debug!(
                discarded = self.splitter.remainder().len(),
                "stream ended with an incomplete frame"
            );
        }
        self.splitter.reset();
        self.decoder.reset();
        self.finished = true;
    }

    /// Next complete frame, if one is queued.
    pub fn next_frame(&mut self) -> Option<String> {
        self.ready.pop_front()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text buffered after the last complete frame.
    pub fn pending_text(&self) -> &str {
        self.splitter.remainder()
    }
}

/// Lazy, finite, non-restartable iterator of frames over byte chunks.
///
/// A source error is yielded once and ends the iteration.
pub struct FrameReader<I> {
    source: I,
    assembler: FrameAssembler,
}

impl<I> FrameReader<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            assembler: FrameAssembler::new(),
        }
    }
}

impl<I, B, E> Iterator for FrameReader<I>
where
    I: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<String, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frame) = self.assembler.next_frame() {
                return Some(Ok(frame));
            }
            if self.assembler.is_finished() {
                return None;
            }
            match self.source.next() {
                Some(Ok(chunk)) => self.assembler.feed(chunk.as_ref()),
                Some(Err(e)) => {
                    self.assembler.finish();
                    return Some(Err(e));
                }
                None => self.assembler.finish(),
            }
        }
    }
}

impl<I, B, E> FusedIterator for FrameReader<I>
where
    I: Iterator<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
}

/// Async counterpart of [`FrameReader`].
pub fn frame_stream<S, B, E>(source: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    stream::unfold(
        (source, FrameAssembler::new()),
        |(mut source, mut assembler)| async move {
            loop {
                if let Some(frame) = assembler.next_frame() {
                    return Some((Ok(frame), (source, assembler)));
                }
                if assembler.is_finished() {
                    return None;
                }
                match source.next().await {
                    Some(Ok(chunk)) => assembler.feed(chunk.as_ref()),
                    Some(Err(e)) => {
                        assembler.finish();
                        return Some((Err(e), (source, assembler)));
                    }
                    None => assembler.finish(),
                }
            }
        },
    )
}
