//! Table Builder
//!
//! Writes sorted key-value entries to a new table stream.

use std::io::{BufWriter, Write};

use crate::error::Result;
use crate::SieveError;

use super::{FOOTER_SIZE, HEADER_SIZE, MAGIC, VERSION};

/// Builder for creating a table from entries appended in key order
pub struct TableBuilder<W: Write> {
    /// Buffered sink for performance
    writer: BufWriter<W>,
    /// Number of entries written
    entry_count: u64,
    /// Current write position (for index)
    current_offset: u64,
    /// Index: key → stream offset of entry
    index: Vec<(Vec<u8>, u64)>,
    /// Last appended key, for sorted-order enforcement
    last_key: Option<Vec<u8>>,
    /// Running CRC hasher for data section
    data_hasher: crc32fast::Hasher,
}

impl<W: Write> TableBuilder<W> {
    /// Create a new table builder over `sink`
    ///
    /// Writes the header immediately; call `append()` in strictly increasing
    /// key order, then `finish()` to write the index block and footer.
    pub fn new(sink: W) -> Result<Self> {
        let mut writer = BufWriter::new(sink);

        writer.write_all(MAGIC)?;
        writer.write_all(&VERSION.to_le_bytes())?;

        Ok(Self {
            writer,
            entry_count: 0,
            current_offset: HEADER_SIZE,
            index: Vec::new(),
            last_key: None,
            data_hasher: crc32fast::Hasher::new(),
        })
    }

    /// Append a key-value pair; keys must be strictly increasing
    pub fn append(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        if let Some(last) = &self.last_key {
            if key <= last.as_slice() {
                return Err(SieveError::Table(format!(
                    "keys must be appended in strictly increasing order ({:?} after {:?})",
                    key, last
                )));
            }
        }

        // Record offset for index
        self.index.push((key.to_vec(), self.current_offset));
        self.last_key = Some(key.to_vec());

        // Entry bytes: [key_len(4)][val_len(4)][key][value]
        let key_len_bytes = (key.len() as u32).to_le_bytes();
        let val_len_bytes = (value.len() as u32).to_le_bytes();

        self.writer.write_all(&key_len_bytes)?;
        self.writer.write_all(&val_len_bytes)?;
        self.writer.write_all(key)?;
        self.writer.write_all(value)?;

        self.data_hasher.update(&key_len_bytes);
        self.data_hasher.update(&val_len_bytes);
        self.data_hasher.update(key);
        self.data_hasher.update(value);

        self.current_offset += 8 + key.len() as u64 + value.len() as u64;
        self.entry_count += 1;

        Ok(())
    }

    /// Finish building: write index block and footer, flush, and return the
    /// total stream length in bytes (the reader needs it to open)
    pub fn finish(mut self) -> Result<u64> {
        // Record where index block starts
        let index_offset = self.current_offset;
        let mut index_size: u64 = 0;

        // Write index block: [key_len(4)][offset(8)][key] for each entry
        for (key, offset) in &self.index {
            self.writer.write_all(&(key.len() as u32).to_le_bytes())?;
            self.writer.write_all(&offset.to_le_bytes())?;
            self.writer.write_all(key)?;
            index_size += 12 + key.len() as u64;
        }

        let data_crc = self.data_hasher.finalize();

        // Footer: index_offset (8) + entry_count (8) + data_crc (4) + padding (4)
        self.writer.write_all(&index_offset.to_le_bytes())?;
        self.writer.write_all(&self.entry_count.to_le_bytes())?;
        self.writer.write_all(&data_crc.to_le_bytes())?;
        self.writer.write_all(&[0u8; 4])?;

        self.writer.flush()?;

        Ok(index_offset + index_size + FOOTER_SIZE)
    }

    /// Number of entries appended so far
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}
