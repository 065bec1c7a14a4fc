//! Frame Writer
//!
//! Splits a stream of `write` calls into framed segments.

use std::io::Write;

use super::packet::encode_packet;

/// Writes framed segments to an underlying stream
///
/// Implements [`std::io::Write`]: every `write` call emits exactly one packet,
/// so callers producing many small chunks should stage each segment in a
/// buffer and submit it with a single call (or wrap this writer in a
/// `BufWriter`).
///
/// ```
/// use std::io::Write;
/// use sievestore::framing::FrameWriter;
///
/// let mut sink = Vec::new();
/// let mut writer = FrameWriter::new(&mut sink);
/// writer.write_all(b"first segment").unwrap();
/// writer.next();
/// writer.write_all(b"second segment").unwrap();
/// ```
pub struct FrameWriter<W: Write> {
    dst: W,
    /// True when the next `write` begins a new segment
    start: bool,
}

impl<W: Write> FrameWriter<W> {
    /// Create a writer; the first `write` starts the first segment
    pub fn new(dst: W) -> Self {
        Self { dst, start: true }
    }

    /// Mark that the following `write` call begins a new segment
    ///
    /// Writes nothing by itself; an empty segment still needs one `write`
    /// (of any length, including zero) to appear on the wire.
    pub fn next(&mut self) {
        self.start = true;
    }

    /// Unwrap the underlying stream
    pub fn into_inner(self) -> W {
        self.dst
    }
}

impl<W: Write> Write for FrameWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        encode_packet(&mut self.dst, self.start, buf)?;
        // Only a fully written packet consumes the start marker
        self.start = false;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.dst.flush()
    }
}
