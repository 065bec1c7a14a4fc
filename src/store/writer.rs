//! Store Writer
//!
//! The write side of a store session: id assignment, record persistence, and
//! incremental index construction.

use std::io::Write;

use crate::error::Result;
use crate::index::{digest_value, write_index, ColumnIndex};
use crate::record::{encode_record, record_key, Value};
use crate::table::TableBuilder;

/// Writes records to the block store while building the column indexes
///
/// A write session is single-threaded: records are appended one at a time and
/// the session is sealed exactly once by [`close`](StoreWriter::close). A
/// failed `write_record` leaves the session unusable: the record append and
/// the per-column index updates are not atomic, so callers must not continue
/// after an error.
pub struct StoreWriter<I: Write, T: Write> {
    /// Next record id, starting at 0
    next_id: u32,
    /// Block store under construction
    table: TableBuilder<T>,
    /// One index per configured column
    indexes: Vec<ColumnIndex>,
    /// Sink for the framed index stream, written at close
    index_sink: I,
}

impl<I: Write, T: Write> StoreWriter<I, T> {
    /// Start a write session indexing the first `columns` fields of each record
    pub fn new(index_sink: I, table_sink: T, columns: usize) -> Result<Self> {
        Ok(Self {
            next_id: 0,
            table: TableBuilder::new(table_sink)?,
            indexes: (0..columns).map(|_| ColumnIndex::new()).collect(),
            index_sink,
        })
    }

    /// Append one record, returning its assigned id
    ///
    /// The record is serialized and appended under its 4-byte big-endian id,
    /// then every field within the configured column count is digested into
    /// its column index. Fields beyond the column count are stored but not
    /// indexed.
    pub fn write_record(&mut self, record: &[Value]) -> Result<u32> {
        let id = self.next_id;
        let key = record_key(id);

        let bytes = encode_record(record)?;
        self.table.append(&key, &bytes)?;

        for (index, value) in self.indexes.iter_mut().zip(record) {
            index.insert(&digest_value(value), id);
        }

        self.next_id += 1;
        Ok(id)
    }

    /// Number of records written so far
    pub fn record_count(&self) -> u32 {
        self.next_id
    }

    /// Seal the store: finish the block store, then persist the indexes
    ///
    /// Returns the total table stream length in bytes, which
    /// [`StoreReader::open`](crate::StoreReader::open) needs later. Consuming
    /// `self` makes double-close unrepresentable.
    pub fn close(self) -> Result<u64> {
        let Self {
            next_id,
            table,
            mut indexes,
            index_sink,
        } = self;

        let table_len = table.finish()?;
        write_index(index_sink, &mut indexes)?;

        tracing::debug!(
            "Sealed store: {} records, {} indexed columns, table {} bytes",
            next_id,
            indexes.len(),
            table_len
        );

        Ok(table_len)
    }
}
