//! # Storage Module
//!
//! Data persistence for the attendance tracker.
//!
//! The domain layer only sees the [`RecordStore`] port. Two implementations
//! exist:
//!
//! - **csv**: one flat CSV file per collection under a data directory
//! - **memory**: a Vec-backed fake for unit tests
//!
//! There is no locking or transaction discipline across files; a single
//! request at a time is assumed.

pub mod csv;
pub mod memory;
pub mod traits;

pub use self::csv::{CsvConnection, CsvRecordStore};
pub use memory::MemoryRecordStore;
pub use traits::{CsvRecord, RecordStore};
