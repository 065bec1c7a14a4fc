//! Column Index
//!
//! The per-column bucket array: 256 record-id bitmaps, one per byte value.

use roaring::RoaringBitmap;

/// Number of buckets per column — one for every possible digest byte value
pub const BUCKETS: usize = 256;

/// Bitmap index for a single column
///
/// Built incrementally during writes, immutable after the store is sealed.
/// The bucket array is fixed-size by design: deserialization addresses
/// buckets purely by segment order, so a sparse map would lose the mapping.
pub struct ColumnIndex {
    buckets: Box<[RoaringBitmap; BUCKETS]>,
}

impl ColumnIndex {
    /// Create an index with all 256 buckets empty
    pub fn new() -> Self {
        Self {
            buckets: Box::new(std::array::from_fn(|_| RoaringBitmap::new())),
        }
    }

    /// Record `id` under every byte value appearing in `digest`
    ///
    /// Bitmap insertion is idempotent, so repeated digest bytes cost nothing
    /// extra — only the distinct set matters.
    pub fn insert(&mut self, digest: &[u8], id: u32) {
        for &byte in digest {
            self.buckets[byte as usize].insert(id);
        }
    }

    /// The bucket for one digest byte value
    pub fn bucket(&self, byte: u8) -> &RoaringBitmap {
        &self.buckets[byte as usize]
    }

    /// All buckets in index order (0..255), for persistence
    pub(crate) fn buckets_mut(&mut self) -> &mut [RoaringBitmap] {
        &mut self.buckets[..]
    }
}

impl Default for ColumnIndex {
    fn default() -> Self {
        Self::new()
    }
}
