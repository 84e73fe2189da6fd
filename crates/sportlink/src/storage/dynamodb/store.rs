//! The item-level store the repository runs on.
//!
//! [`ItemStore`] is the narrow seam between the repository algorithm and
//! DynamoDB: one put, one point read, and one query page at a time. The
//! in-memory table implements it too, which lets the repository run against
//! either.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, Select};
use aws_sdk_dynamodb::Client;

use sportlink_core::storage::Result;

use super::error::{map_get_item_error, map_put_item_error, map_query_error};
use super::expression::QueryExpression;
use super::keys::{PARTITION_KEY, SORT_KEY};

/// One stored item, as attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// Builds the primary key of an item.
pub fn item_key(partition: &str, sort: &str) -> Item {
    HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(partition.to_string()),
        ),
        (SORT_KEY.to_string(), AttributeValue::S(sort.to_string())),
    ])
}

/// Paging controls for a single query round trip.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Maximum number of items to evaluate, before the filter is applied.
    pub limit: Option<usize>,
    /// Key of the last item evaluated by the previous page.
    pub exclusive_start_key: Option<Item>,
    /// Return only the number of matching items.
    pub count_only: bool,
}

/// One page of a query.
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    /// Matching items; empty for count-only queries.
    pub items: Vec<Item>,
    /// Number of matching items in this page.
    pub count: usize,
    /// Present when the query has more pages.
    pub last_evaluated_key: Option<Item>,
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes an item, replacing any item with the same key.
    async fn put_item(&self, item: Item) -> Result<()>;

    /// Reads the item stored under `key`.
    async fn get_item(&self, key: Item) -> Result<Option<Item>>;

    /// Runs one page of a query.
    async fn query_page(&self, expression: &QueryExpression, options: PageOptions)
        -> Result<QueryPage>;
}

/// [`ItemStore`] backed by a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a store over `table_name` with the given client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn put_item(&self, item: Item) -> Result<()> {
        let id = item
            .get(SORT_KEY)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .unwrap_or_default();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Item", id))?;

        Ok(())
    }

    async fn get_item(&self, key: Item) -> Result<Option<Item>> {
        let id = key
            .get(SORT_KEY)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .unwrap_or_default();

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, "Item", id))?;

        Ok(result.item)
    }

    async fn query_page(
        &self,
        expression: &QueryExpression,
        options: PageOptions,
    ) -> Result<QueryPage> {
        let rendered = expression.render();
        let limit = options
            .limit
            .map(|limit| i32::try_from(limit).unwrap_or(i32::MAX));

        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(rendered.key_condition)
            .set_filter_expression(rendered.filter)
            .set_expression_attribute_names(Some(rendered.names))
            .set_expression_attribute_values(Some(rendered.values))
            .set_limit(limit)
            .set_exclusive_start_key(options.exclusive_start_key);
        if options.count_only {
            request = request.select(Select::Count);
        }

        let result = request.send().await.map_err(map_query_error)?;

        Ok(QueryPage {
            count: usize::try_from(result.count).unwrap_or_default(),
            items: result.items.unwrap_or_default(),
            last_evaluated_key: result.last_evaluated_key,
        })
    }
}
