//! Framing Protocol
//!
//! Serializes an ordered sequence of byte segments, each of arbitrary and
//! a-priori-unknown length, into one underlying byte stream — and lets a
//! reader consume them segment-by-segment without a table of contents.
//!
//! ## Wire Format
//!
//! One packet per `write` call, XDR-style (RFC 4506):
//!
//! ```text
//! ┌──────────────┬──────────────┬────────────────┬───────────────┐
//! │ Start (4)    │ Len (4)      │ Data (Len)     │ Pad (0-3)     │
//! │ BE bool 0/1  │ BE u32       │                │ zero bytes    │
//! └──────────────┴──────────────┴────────────────┴───────────────┘
//! ```
//!
//! A packet with `Start = 1` begins a new segment; `Start = 0` continues the
//! current one. Segment boundaries are the only structure on the wire, so
//! segment *order* is load-bearing for callers (the index persists its
//! metadata and every bucket bitmap as one segment each, in a fixed order).
//!
//! Every `write` call emits a full packet. Callers with many small logical
//! writes should stage them in a buffer and submit each segment as one call.

mod packet;
mod reader;
mod writer;

pub use reader::FrameReader;
pub use writer::FrameWriter;

/// Maximum data length accepted for a single packet (1 GiB)
///
/// Guards the reader against allocating for a corrupt length field.
pub(crate) const MAX_PACKET_DATA: usize = 1 << 30;
