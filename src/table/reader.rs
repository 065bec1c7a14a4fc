//! Table Reader
//!
//! Opens a table stream and provides O(log n) point lookups via an in-memory
//! index loaded once at open time.

use std::collections::BTreeMap;
use std::io::{Read, Seek, SeekFrom};

use crate::error::Result;
use crate::SieveError;

use super::{FOOTER_SIZE, HEADER_SIZE, MAGIC, VERSION};

/// Reader for table streams with an in-memory key index
pub struct TableReader<R: Read + Seek> {
    src: R,
    /// In-memory index: key → stream offset
    index: BTreeMap<Vec<u8>, u64>,
    /// Metadata
    entry_count: u64,
}

impl<R: Read + Seek> TableReader<R> {
    /// Open a table for reading, given its source and total length in bytes
    ///
    /// Validates header and footer and loads the entire index into memory.
    pub fn open(mut src: R, length: u64) -> Result<Self> {
        if length < HEADER_SIZE + FOOTER_SIZE {
            return Err(SieveError::Table(format!(
                "table stream too short: {} bytes",
                length
            )));
        }

        // Read and validate header
        src.seek(SeekFrom::Start(0))?;
        let mut header = [0u8; HEADER_SIZE as usize];
        src.read_exact(&mut header)?;

        if &header[0..4] != MAGIC {
            return Err(SieveError::Table(format!(
                "invalid table magic: expected SVTB, got {:?}",
                &header[0..4]
            )));
        }

        let version = u16::from_le_bytes(header[4..6].try_into().unwrap());
        if version != VERSION {
            return Err(SieveError::Table(format!(
                "unsupported table version: {}",
                version
            )));
        }

        // Read footer to locate the index block
        src.seek(SeekFrom::Start(length - FOOTER_SIZE))?;
        let mut footer = [0u8; FOOTER_SIZE as usize];
        src.read_exact(&mut footer)?;

        let index_offset = u64::from_le_bytes(footer[0..8].try_into().unwrap());
        let entry_count = u64::from_le_bytes(footer[8..16].try_into().unwrap());
        let _data_crc = u32::from_le_bytes(footer[16..20].try_into().unwrap());
        // Note: CRC validation could be done here for extra safety

        if index_offset < HEADER_SIZE || index_offset > length - FOOTER_SIZE {
            return Err(SieveError::Table(format!(
                "index offset {} out of bounds",
                index_offset
            )));
        }

        // Load index into memory
        src.seek(SeekFrom::Start(index_offset))?;
        let index_block_size = length - FOOTER_SIZE - index_offset;
        let mut index_data = vec![0u8; index_block_size as usize];
        src.read_exact(&mut index_data)?;

        // Parse index entries: [key_len(4)][offset(8)][key]
        let mut index = BTreeMap::new();
        let mut pos = 0;
        while pos + 12 <= index_data.len() {
            let key_len =
                u32::from_le_bytes(index_data[pos..pos + 4].try_into().unwrap()) as usize;
            pos += 4;

            let offset = u64::from_le_bytes(index_data[pos..pos + 8].try_into().unwrap());
            pos += 8;

            if pos + key_len > index_data.len() {
                return Err(SieveError::Table("truncated index block".into()));
            }
            let key = index_data[pos..pos + key_len].to_vec();
            pos += key_len;

            index.insert(key, offset);
        }

        if index.len() as u64 != entry_count {
            return Err(SieveError::Table(format!(
                "index holds {} keys but footer declares {} entries",
                index.len(),
                entry_count
            )));
        }

        Ok(Self {
            src,
            index,
            entry_count,
        })
    }

    /// Get a value by key — O(log n) lookup via the in-memory index
    ///
    /// Returns [`SieveError::KeyNotFound`] when the key is absent.
    pub fn get(&mut self, key: &[u8]) -> Result<Vec<u8>> {
        let offset = match self.index.get(key) {
            Some(&off) => off,
            None => return Err(SieveError::KeyNotFound),
        };

        // Seek directly to the entry
        self.src.seek(SeekFrom::Start(offset))?;

        let mut header = [0u8; 8];
        self.src.read_exact(&mut header)?;

        let key_len = u32::from_le_bytes(header[0..4].try_into().unwrap()) as usize;
        let val_len = u32::from_le_bytes(header[4..8].try_into().unwrap()) as usize;

        // Skip the key (the index already matched it)
        self.src.seek(SeekFrom::Current(key_len as i64))?;

        let mut value = vec![0u8; val_len];
        self.src.read_exact(&mut value)?;

        Ok(value)
    }

    /// Get entry count
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }
}
