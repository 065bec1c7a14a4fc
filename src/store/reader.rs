//! Store Reader
//!
//! The read side of a sealed store: candidate lookups over the rehydrated
//! column indexes, plus lazy record iteration.

use std::borrow::Cow;
use std::io::{Read, Seek};

use parking_lot::Mutex;
use roaring::RoaringBitmap;

use crate::error::Result;
use crate::index::{digest_value, read_index, ColumnIndex, BUCKETS, DIGEST_LEN};
use crate::record::{decode_record, record_key, Record, Value};
use crate::table::TableReader;

/// Read handle over a sealed store
///
/// Construction fails atomically: either the table and every declared bucket
/// bitmap load, or no reader exists. Once open, the indexes are immutable and
/// `lookup` is safe to call from any number of threads.
pub struct StoreReader<T: Read + Seek> {
    /// One index per column persisted at write time
    indexes: Vec<ColumnIndex>,
    /// Block store; the mutex guards the stream cursor during point lookups
    table: Mutex<TableReader<T>>,
    /// Shared empty result, constructed once and never mutated
    empty: RoaringBitmap,
}

impl<T: Read + Seek> StoreReader<T> {
    /// Open a sealed store from its index stream and table stream
    ///
    /// `table_len` is the table stream length in bytes, as returned by
    /// [`StoreWriter::close`](crate::StoreWriter::close).
    pub fn open<I: Read>(index_source: I, table_source: T, table_len: u64) -> Result<Self> {
        let table = TableReader::open(table_source, table_len)?;
        let indexes = read_index(index_source)?;

        tracing::debug!(
            "Opened store reader: {} indexed columns, {} records",
            indexes.len(),
            table.entry_count()
        );

        Ok(Self {
            indexes,
            table: Mutex::new(table),
            empty: RoaringBitmap::new(),
        })
    }

    /// Number of indexed columns
    pub fn columns(&self) -> usize {
        self.indexes.len()
    }

    /// Number of records in the store
    pub fn record_count(&self) -> u64 {
        self.table.lock().entry_count()
    }

    /// Look up the candidate record ids for `value` in `column`
    ///
    /// Gathers the buckets named by the distinct bytes of the value's digest
    /// and intersects them. `parallelism` is the worker fan-out for the
    /// intersection; `0` computes sequentially, and the result is
    /// bit-identical either way.
    ///
    /// The returned bitmap is a **candidate set**: the index records only the
    /// distinct-byte set of each digest, so false positives are possible by
    /// design. Callers needing confirmed matches must re-check the fetched
    /// records. The bitmap may borrow shared index state and must not be
    /// mutated — `Cow` makes that explicit.
    pub fn lookup(&self, parallelism: usize, column: usize, value: &Value) -> Cow<'_, RoaringBitmap> {
        let Some(index) = self.indexes.get(column) else {
            return Cow::Borrowed(&self.empty);
        };

        let digest = digest_value(value);
        let mut used = [false; BUCKETS];
        let mut picked: Vec<&RoaringBitmap> = Vec::with_capacity(DIGEST_LEN);
        for &byte in &digest {
            if !used[byte as usize] {
                used[byte as usize] = true;
                picked.push(index.bucket(byte));
            }
        }

        match picked.len() {
            0 => Cow::Borrowed(&self.empty),
            1 => Cow::Borrowed(picked[0]),
            _ => Cow::Owned(intersect(parallelism, &picked)),
        }
    }

    /// Lazily iterate the records named by `bitmap`, in ascending id order
    ///
    /// Each element performs one point lookup against the block store. A
    /// fetch or decode failure surfaces as an `Err` element and does not
    /// disturb iteration of the remaining ids.
    pub fn read_records<'a>(&'a self, bitmap: &'a RoaringBitmap) -> RecordIter<'a, T> {
        RecordIter {
            store: self,
            ids: bitmap.iter(),
        }
    }

    fn fetch(&self, id: u32) -> Result<Record> {
        let bytes = self.table.lock().get(&record_key(id))?;
        decode_record(&bytes)
    }
}

/// Lazy, finite, non-restartable iterator over matching records
pub struct RecordIter<'a, T: Read + Seek> {
    store: &'a StoreReader<T>,
    ids: roaring::bitmap::Iter<'a>,
}

impl<'a, T: Read + Seek> Iterator for RecordIter<'a, T> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some(self.store.fetch(id))
    }
}

// =============================================================================
// Bucket Intersection
// =============================================================================

/// Intersect the picked buckets with the requested worker fan-out
///
/// AND is associative and commutative, so chunking across workers cannot
/// change the result — only the wall-clock time.
fn intersect(parallelism: usize, buckets: &[&RoaringBitmap]) -> RoaringBitmap {
    if parallelism <= 1 || buckets.len() <= 2 {
        return and_all(buckets);
    }

    let workers = parallelism.min(buckets.len());
    let chunk = (buckets.len() + workers - 1) / workers;

    let partials: Vec<RoaringBitmap> = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = buckets
            .chunks(chunk)
            .map(|group| scope.spawn(move |_| and_all(group)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("intersection worker panicked"))
            .collect()
    })
    .expect("intersection worker panicked");

    let refs: Vec<&RoaringBitmap> = partials.iter().collect();
    and_all(&refs)
}

/// Sequential AND over a non-empty bucket slice, smallest cardinality first
fn and_all(buckets: &[&RoaringBitmap]) -> RoaringBitmap {
    let mut sorted = buckets.to_vec();
    sorted.sort_unstable_by_key(|b| b.len());

    let mut acc = sorted[0].clone();
    for bucket in &sorted[1..] {
        if acc.is_empty() {
            break;
        }
        acc &= *bucket;
    }
    acc
}
