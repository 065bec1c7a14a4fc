//! Record model and codec
//!
//! A record is an ordered, heterogeneous list of field values. Records are
//! immutable once written and are persisted as bincode-serialized bytes under
//! their 4-byte big-endian record id.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// A record: one field value per column, in column order
pub type Record = Vec<Value>;

/// A single field value
///
/// The supported kinds round-trip exactly through [`encode_record`] /
/// [`decode_record`]. The index never sees these directly — it digests the
/// [`canonical`](Value::canonical) string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Canonical textual form of the value, as fed to the index digest
    ///
    /// Two values with the same canonical form are identical to the index:
    /// `Int(30)` and `Str("30")` both digest as `"30"`.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::Str(s) => Cow::Borrowed(s),
            Value::Bytes(b) => String::from_utf8_lossy(b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// =============================================================================
// Record Codec
// =============================================================================

/// Serialize a record's field list to bytes
pub fn encode_record(record: &[Value]) -> Result<Vec<u8>> {
    bincode::serialize(record).map_err(|e| SieveError::Encode(format!("record: {}", e)))
}

/// Deserialize a record from its stored bytes
pub fn decode_record(bytes: &[u8]) -> Result<Record> {
    bincode::deserialize(bytes).map_err(|e| SieveError::Decode(format!("record: {}", e)))
}

// =============================================================================
// Table Key Encoding
// =============================================================================

/// Encode a record id as the block-store key (4-byte big-endian)
///
/// Big-endian keeps lexicographic key order equal to numeric id order, which
/// is what lets the table builder take ids in assignment order.
pub fn record_key(id: u32) -> [u8; 4] {
    id.to_be_bytes()
}
