//! CSV file storage: one flat file per record type under a data directory.

pub mod connection;
pub mod record_store;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use record_store::CsvRecordStore;
