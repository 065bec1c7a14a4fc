//! Hash-Bucket Index
//!
//! One index per indexable column: 256 record-id bitmaps ("buckets"). Bucket
//! *b* of column *c* contains record id *i* iff byte value *b* appears
//! anywhere in the 16-byte digest of record *i*'s column-*c* value.
//!
//! Only the *set of distinct byte values* in a digest is meaningful — order
//! and multiplicity are discarded. Two values whose digests contain the same
//! distinct-byte set are therefore indistinguishable: lookups return
//! *candidates*, not confirmed matches. This is the deliberate trade that
//! keeps the on-disk index dense and bounded (256 buckets per column).
//!
//! ## Persistence
//!
//! The index is persisted over the framing protocol as a fixed segment
//! sequence, which is the only on-disk indication of bucket identity:
//!
//! ```text
//! segment 0                : IndexMeta (bincode)
//! segments 1 .. 256        : column 0, buckets 0..255 (roaring images)
//! segments 257 .. 512      : column 1, buckets 0..255
//! ...
//! ```

mod column;
mod digest;
mod persist;

use serde::{Deserialize, Serialize};

pub use column::{ColumnIndex, BUCKETS};
pub use digest::{digest_value, fnv128a, DIGEST_LEN};
pub use persist::{read_index, write_index};

/// Index metadata header, persisted as segment 0 of the index stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    /// Number of indexed columns (256 bucket segments follow per column)
    pub columns: u32,
}
