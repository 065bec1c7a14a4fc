//! Index persistence
//!
//! Serializes and rehydrates the full column-index array over the framing
//! protocol. Segment order is the format: metadata first, then 256 bucket
//! segments per column, columns in position order, buckets in 0..255 order.

use std::io::{Read, Write};

use roaring::RoaringBitmap;

use crate::error::{Result, SieveError};
use crate::framing::{FrameReader, FrameWriter};

use super::{ColumnIndex, IndexMeta};

/// Persist every column index through one framed stream
///
/// Buckets are run-optimized before serialization. Each metadata/bucket image
/// is staged in a scratch buffer and submitted as a single framed write, so
/// every image occupies one segment of exactly one packet.
pub fn write_index<W: Write>(sink: W, indexes: &mut [ColumnIndex]) -> Result<()> {
    let mut frames = FrameWriter::new(sink);

    let meta = IndexMeta {
        columns: indexes.len() as u32,
    };
    let header = bincode::serialize(&meta)
        .map_err(|e| SieveError::Encode(format!("index metadata: {}", e)))?;
    frames.write_all(&header)?;
    frames.next();

    let mut scratch = Vec::new();
    for index in indexes.iter_mut() {
        for bucket in index.buckets_mut() {
            bucket.optimize();
            scratch.clear();
            bucket
                .serialize_into(&mut scratch)
                .map_err(|e| SieveError::Encode(format!("bucket bitmap: {}", e)))?;
            frames.write_all(&scratch)?;
            frames.next();
        }
    }

    frames.flush()?;
    Ok(())
}

/// Rehydrate the full column-index array from a framed stream
///
/// Fails with [`SieveError::FormatMismatch`] when the stream ends before the
/// metadata-declared number of bucket segments has been read — a short stream
/// is never silently tolerated.
pub fn read_index<R: Read>(source: R) -> Result<Vec<ColumnIndex>> {
    let mut frames = FrameReader::new(source);

    if !frames.next_segment()? {
        return Err(SieveError::FormatMismatch(
            "index stream has no metadata segment".into(),
        ));
    }
    let mut raw = Vec::new();
    frames
        .read_to_end(&mut raw)
        .map_err(|e| SieveError::Decode(format!("index metadata segment: {}", e)))?;
    let meta: IndexMeta = bincode::deserialize(&raw)
        .map_err(|e| SieveError::Decode(format!("index metadata: {}", e)))?;

    let mut indexes = Vec::with_capacity(meta.columns as usize);
    for column in 0..meta.columns {
        let mut index = ColumnIndex::new();
        for (bucket, slot) in index.buckets_mut().iter_mut().enumerate() {
            if !frames.next_segment()? {
                return Err(SieveError::FormatMismatch(format!(
                    "index stream ended at column {} bucket {} (metadata declared {} columns)",
                    column, bucket, meta.columns
                )));
            }
            *slot = RoaringBitmap::deserialize_from(&mut frames)
                .map_err(|e| SieveError::Decode(format!("bucket bitmap: {}", e)))?;
        }
        indexes.push(index);
    }

    Ok(indexes)
}
