//! # SieveStore
//!
//! A disk-resident, column-indexed record store:
//! - Records append to a sorted block store keyed by a dense u32 id
//! - Per indexed column, a 256-bucket bitmap index built during writes
//! - Equality lookups intersect bucket bitmaps instead of scanning
//! - Segmented framing protocol persists the bitmaps without a directory
//!
//! ## Architecture Overview
//!
//! ```text
//!                 Write Path                       Read Path
//!
//!   ┌──────────────────────────────┐   ┌──────────────────────────────┐
//!   │         StoreWriter          │   │         StoreReader          │
//!   │  (assign id, serialize row)  │   │  (lookup → candidate bitmap) │
//!   └───────┬──────────────┬───────┘   └───────┬──────────────┬───────┘
//!           │              │                   │              │
//!           ▼              ▼                   ▼              ▼
//!   ┌─────────────┐ ┌─────────────┐    ┌─────────────┐ ┌─────────────┐
//!   │ TableBuilder│ │ ColumnIndex │    │ TableReader │ │ ColumnIndex │
//!   │ (block kv)  │ │ 256 buckets │    │ (point get) │ │ 256 buckets │
//!   └─────────────┘ └──────┬──────┘    └─────────────┘ └──────▲──────┘
//!                          │ close()                          │ open()
//!                          ▼                                  │
//!                   ┌─────────────────────────────────────────┴──┐
//!                   │              Framing Protocol               │
//!                   │   (one segment per metadata/bucket image)   │
//!                   └─────────────────────────────────────────────┘
//! ```
//!
//! ## Approximate matching
//!
//! The index is a pre-filter, not an exact match: a lookup returns a *candidate*
//! bitmap that may contain false positives (two values whose digests share the
//! same set of distinct byte values are indistinguishable to the index). Callers
//! that need confirmed matches must re-verify fetched records themselves.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;

pub mod record;
pub mod framing;
pub mod index;
pub mod table;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SieveError};
pub use record::{Record, Value};
pub use store::{RecordIter, StoreReader, StoreWriter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SieveStore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
