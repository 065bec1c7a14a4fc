//! Error types for SieveStore
//!
//! Provides a unified error type for all operations.
//!
//! End-of-data is deliberately *not* an error here: the framing reader reports
//! it as `Ok(false)` from `next_segment` and `Ok(0)` from `read`, keeping the
//! "no more segments" control signal distinct from a real `Decode` failure.

use thiserror::Error;

/// Result type alias using SieveError
pub type Result<T> = std::result::Result<T, SieveError>;

/// Unified error type for SieveStore operations
#[derive(Debug, Error)]
pub enum SieveError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    /// A record, metadata header, or framing packet could not be serialized.
    /// Fatal to the current call; zero bytes were accepted.
    #[error("Encode error: {0}")]
    Encode(String),

    /// A corrupt or truncated stream. Sticky for the remainder of a framing
    /// reader's lifetime.
    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Block Store Errors
    // -------------------------------------------------------------------------
    #[error("Table error: {0}")]
    Table(String),

    #[error("Key not found")]
    KeyNotFound,

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    /// Metadata declared a column count inconsistent with the bucket segments
    /// actually present in the index stream. Detected at reader load.
    #[error("Format mismatch: {0}")]
    FormatMismatch(String),
}
