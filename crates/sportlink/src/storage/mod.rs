//! Storage backend implementations.
//!
//! Both backends implement the repository traits defined in
//! `sportlink_core::storage` through the same [`DynamoDbRepository`]; they
//! differ only in the [`ItemStore`](dynamodb::ItemStore) underneath. The
//! backend is chosen at startup.

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::{DynamoDbRepository, DynamoDbStore};
pub use inmemory::InMemoryTable;
