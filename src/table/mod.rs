//! Table Module
//!
//! The sorted key-value block store backing the record table. Keys arrive in
//! strictly increasing order (record ids are dense and assigned in arrival
//! order), so the data block is sorted by construction.
//!
//! Generic over the underlying sink/source: the builder takes any
//! `io::Write`, the reader any `io::Read + io::Seek` plus the stream length.
//! Because a plain sink cannot seek back to patch a header, all trailing
//! metadata (including the entry count) lives in the footer.
//!
//! ## Stream Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (6 bytes)                                        │
//! │   Magic: "SVTB" (4) | Version: u16 (2)                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Data Block (variable)                                   │
//! │   [KeyLen: u32][ValLen: u32][Key][Value]                │
//! │   ... repeated for each entry, keys strictly increasing │
//! ├─────────────────────────────────────────────────────────┤
//! │ Index Block (variable)                                  │
//! │   [KeyLen: u32][Offset: u64][Key]                       │
//! │   ... repeated for each entry ...                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (24 bytes)                                       │
//! │   IndexOffset: u64 | EntryCount: u64 | DataCRC: u32     │
//! │   Padding (4)                                           │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod builder;
mod reader;

pub use builder::TableBuilder;
pub use reader::TableReader;

// =============================================================================
// Shared Constants (used by builder and reader)
// =============================================================================

/// Magic bytes identifying a SieveStore table stream
pub(crate) const MAGIC: &[u8; 4] = b"SVTB";

/// Current table format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) = 6 bytes
pub(crate) const HEADER_SIZE: u64 = 6;

/// Footer size: IndexOffset (8) + EntryCount (8) + DataCRC (4) + Padding (4)
pub(crate) const FOOTER_SIZE: u64 = 24;
