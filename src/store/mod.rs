//! Store Module
//!
//! The record store facade tying the pieces together.
//!
//! ## Responsibilities
//! - Assign dense record ids in arrival order (write side)
//! - Serialize records and append them to the block store
//! - Drive index construction on write, index rehydration on open
//! - Answer lookups via bucket intersection and lazy record iteration
//!
//! ## Concurrency Model
//!
//! - **Write sessions** are strictly single-writer: `StoreWriter` takes
//!   `&mut self` for every mutation and is sealed exactly once by `close`
//!   (enforced by move semantics).
//! - **Read sessions** are safe for unbounded concurrent lookups: the column
//!   indexes are immutable after `open`, so `lookup` takes `&self`. The only
//!   mutable state is the table stream cursor, guarded by a `parking_lot`
//!   mutex held per point lookup.

mod reader;
mod writer;

pub use reader::{RecordIter, StoreReader};
pub use writer::StoreWriter;
