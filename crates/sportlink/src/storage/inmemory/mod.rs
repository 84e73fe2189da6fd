//! In-memory storage backend.
//!
//! Emulates the single DynamoDB table behind the same [`ItemStore`] seam, so
//! the DynamoDB repository runs unchanged on top of it. Useful for tests and
//! local development; data is lost when the process exits.
//!
//! [`ItemStore`]: crate::storage::dynamodb::ItemStore

mod table;

pub use table::InMemoryTable;
