//! Frame Reader
//!
//! Consumes framed segments from an underlying stream, one at a time.
//!
//! ## State Machine
//!
//! ```text
//!                    start=true packet decoded
//!   ┌────────────┐ ─────────────────────────────▶ ┌────────────┐
//!   │ InSegment  │                                │ AtBoundary │
//!   │            │ ◀───────────────────────────── │            │
//!   └─────┬──────┘        next_segment()          └────────────┘
//!         │
//!         │ clean end of stream          decode error
//!         ▼                                   ▼
//!   ┌────────────┐                      ┌────────────┐
//!   │ Exhausted  │  (sticky)            │   Failed   │  (sticky)
//!   └────────────┘                      └────────────┘
//! ```
//!
//! `Exhausted` and `Failed` are sticky: once entered, every subsequent call
//! reproduces end-of-data or the stored decode error, so a caller can never
//! silently resume on a corrupt stream.

use std::io::Read;

use crate::error::{Result, SieveError};

use super::packet::decode_packet;

/// Per-segment position of the reader
enum ReaderState {
    /// The next packet was decoded with start=true and has not been consumed
    AtBoundary,
    /// Inside a segment; zero or more payload bytes remain buffered
    InSegment,
    /// The underlying stream delivered end-of-data
    Exhausted,
    /// A decode error occurred; the reason is re-reported on every call
    Failed(String),
}

/// Reads framed segments from an underlying stream
///
/// Segments are consumed in order: `next_segment` positions the reader at the
/// start of the next segment, then the [`std::io::Read`] impl drains that
/// segment's bytes, returning `Ok(0)` once the segment ends (the following
/// boundary packet is retained for the next `next_segment` call).
pub struct FrameReader<R: Read> {
    src: R,
    state: ReaderState,
    /// Payload of the most recently decoded packet; capacity is retained
    /// across packets so many small segments do not reallocate
    buf: Vec<u8>,
    /// Drain position within `buf`
    pos: usize,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader positioned before the first segment
    pub fn new(src: R) -> Self {
        Self {
            src,
            state: ReaderState::InSegment,
            buf: Vec::new(),
            pos: 0,
        }
    }

    /// Advance to the next segment
    ///
    /// Discards any unread remainder of the current segment. Returns
    /// `Ok(true)` positioned at the start of a segment, `Ok(false)` when the
    /// stream holds no further segments, or the (sticky) decode error.
    pub fn next_segment(&mut self) -> Result<bool> {
        loop {
            match &self.state {
                ReaderState::Failed(msg) => return Err(SieveError::Decode(msg.clone())),
                ReaderState::Exhausted => return Ok(false),
                ReaderState::AtBoundary => {
                    // Consume the boundary; its payload is already buffered
                    self.state = ReaderState::InSegment;
                    return Ok(true);
                }
                ReaderState::InSegment => self.decode_next()?,
            }
        }
    }

    /// Decode one packet, updating state; residual payload is discarded
    fn decode_next(&mut self) -> Result<()> {
        match decode_packet(&mut self.src, &mut self.buf) {
            Ok(None) => {
                self.state = ReaderState::Exhausted;
                Ok(())
            }
            Ok(Some(start)) => {
                self.pos = 0;
                if start {
                    self.state = ReaderState::AtBoundary;
                }
                Ok(())
            }
            Err(e) => {
                self.state = ReaderState::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

impl<R: Read> Read for FrameReader<R> {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < out.len() {
            match &self.state {
                ReaderState::Failed(msg) => {
                    // A call that already produced bytes never reports the
                    // failure; it resurfaces on the next call
                    if filled > 0 {
                        return Ok(filled);
                    }
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        msg.clone(),
                    ));
                }
                // Segment end (boundary retained) or true end-of-data
                ReaderState::AtBoundary | ReaderState::Exhausted => return Ok(filled),
                ReaderState::InSegment => {
                    if self.pos < self.buf.len() {
                        let n = (out.len() - filled).min(self.buf.len() - self.pos);
                        out[filled..filled + n]
                            .copy_from_slice(&self.buf[self.pos..self.pos + n]);
                        self.pos += n;
                        filled += n;
                        continue;
                    }
                    // Buffered payload exhausted: decode the next packet; a
                    // start=false packet continues this segment, start=true
                    // flips to AtBoundary and ends the read above
                    let _ = self.decode_next();
                }
            }
        }
        Ok(filled)
    }
}
