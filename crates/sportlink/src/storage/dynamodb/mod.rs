//! DynamoDB storage backend implementation.
//!
//! All entities share one table keyed by `EntityId` (entity type) and `Id`.
//! The repository talks to the table through [`ItemStore`], implemented by
//! [`DynamoDbStore`] for AWS and by the in-memory table for tests and local
//! runs.

mod conversions;
mod error;
mod expression;
mod keys;
mod repository;
mod store;

pub use expression::{QueryExpression, QueryFilterBuilder, RenderedExpression};
pub use keys::{PARTITION_KEY, SORT_KEY};
pub use repository::{announcement_expression, DynamoDbRepository, DEFAULT_FETCH_BATCH_SIZE};
pub use store::{item_key, DynamoDbStore, Item, ItemStore, PageOptions, QueryPage};
