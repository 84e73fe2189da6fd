//! Table configuration types (Functional Core - pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    /// Attribute DynamoDB reads expiry instants from, if TTL is wanted.
    pub ttl_attribute: Option<String>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Returns the canonical single-table configuration for sportlink.
/// This is a pure function - no I/O.
///
/// Every entity shares the table: `EntityId` holds the entity type and `Id`
/// the entity's own id. Announcements carry an `ExpiresAt` TTL.
pub fn sportlink_table_config() -> TableConfig {
    TableConfig {
        table_name: "SportLinkCore".to_string(),
        partition_key: KeyAttribute {
            name: "EntityId".to_string(),
            attribute_type: AttributeType::String,
        },
        sort_key: Some(KeyAttribute {
            name: "Id".to_string(),
            attribute_type: AttributeType::String,
        }),
        ttl_attribute: Some("ExpiresAt".to_string()),
        billing_mode: BillingMode::PayPerRequest,
    }
}
