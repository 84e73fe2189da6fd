//! In-memory single-table store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sportlink_core::storage::{RepositoryError, Result};

use crate::storage::dynamodb::{
    item_key, ItemStore, PageOptions, QueryExpression, QueryPage, Item, PARTITION_KEY, SORT_KEY,
};

type TableKey = (String, String);

/// A table kept in memory, answering queries the way DynamoDB does.
///
/// Items are kept in (partition, sort) key order. A page stops after
/// `limit` items have been *evaluated*, before the filter runs, so a
/// filtered page can come back short or empty while more pages remain.
/// `max_page_size` caps every page, which simulates the continuation chains
/// DynamoDB produces for large partitions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTable {
    items: Arc<RwLock<BTreeMap<TableKey, Item>>>,
    max_page_size: Option<usize>,
}

impl InMemoryTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of items evaluated per page.
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = Some(max_page_size.max(1));
        self
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

fn table_key(item: &Item) -> Result<TableKey> {
    let get = |name: &str| {
        item.get(name)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .ok_or_else(|| RepositoryError::InvalidData(format!("Missing key attribute: {name}")))
    };
    Ok((get(PARTITION_KEY)?, get(SORT_KEY)?))
}

fn page_size(limit: Option<usize>, max_page_size: Option<usize>) -> Option<usize> {
    match (limit, max_page_size) {
        (Some(limit), Some(max)) => Some(limit.min(max)),
        (limit, max) => limit.or(max),
    }
}

#[async_trait]
impl ItemStore for InMemoryTable {
    async fn put_item(&self, item: Item) -> Result<()> {
        let key = table_key(&item)?;
        self.items.write().await.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, key: Item) -> Result<Option<Item>> {
        let key = table_key(&key)?;
        Ok(self.items.read().await.get(&key).cloned())
    }

    async fn query_page(
        &self,
        expression: &QueryExpression,
        options: PageOptions,
    ) -> Result<QueryPage> {
        let start_after = options
            .exclusive_start_key
            .as_ref()
            .map(table_key)
            .transpose()?;
        let page_size = page_size(options.limit, self.max_page_size);

        let items = self.items.read().await;
        let mut candidates = items
            .iter()
            .filter(|(key, _)| start_after.as_ref().map_or(true, |start| *key > start))
            .filter(|(_, item)| expression.key_matches(item))
            .peekable();

        let mut page = QueryPage::default();
        let mut evaluated = 0;
        while let Some(((partition, sort), item)) = candidates.next() {
            evaluated += 1;
            if expression.filter_matches(item) {
                page.count += 1;
                if !options.count_only {
                    page.items.push(item.clone());
                }
            }

            if page_size.is_some_and(|size| evaluated >= size) {
                if candidates.peek().is_some() {
                    page.last_evaluated_key = Some(item_key(partition, sort));
                }
                break;
            }
        }

        Ok(page)
    }
}
