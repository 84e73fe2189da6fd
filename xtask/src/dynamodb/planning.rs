//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// Attribute TTL is enabled on, if any.
    pub ttl_attribute: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created (and TTL enabled).
    CreateTable { config: TableConfig },
    /// Table exists, TTL needs to be enabled on it.
    EnableTtl {
        table_name: String,
        attribute: String,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    match &desired.ttl_attribute {
        Some(attribute) if state.ttl_attribute.as_ref() != Some(attribute) => {
            DeployPlan::EnableTtl {
                table_name: desired.table_name.clone(),
                attribute: attribute.clone(),
            }
        }
        _ => DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        },
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            if let Some(sk) = &config.sort_key {
                lines.push(format!("  Sort key: {} (S)", sk.name));
            }
            if let Some(ttl) = &config.ttl_attribute {
                lines.push(format!("  + TTL on: {}", ttl));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::EnableTtl {
            table_name,
            attribute,
        } => vec![
            format!("~ Update table: {}", table_name),
            format!("  + Enable TTL on: {}", attribute),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::sportlink_table_config;

    fn active(ttl_attribute: Option<&str>) -> TableState {
        TableState {
            status: TableStatus::Active,
            ttl_attribute: ttl_attribute.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = sportlink_table_config();
        let plan = calculate_deploy_plan(None, &config);
        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn test_table_without_ttl_gets_it_enabled() {
        let plan = calculate_deploy_plan(Some(&active(None)), &sportlink_table_config());
        assert_eq!(
            plan,
            DeployPlan::EnableTtl {
                table_name: "SportLinkCore".to_string(),
                attribute: "ExpiresAt".to_string(),
            }
        );
    }

    #[test]
    fn test_up_to_date_table() {
        let plan = calculate_deploy_plan(
            Some(&active(Some("ExpiresAt"))),
            &sportlink_table_config().with_table_name("Local"),
        );
        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "Local".to_string()
            }
        );
    }

    #[test]
    fn test_create_plan_lists_keys_and_ttl() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: sportlink_table_config(),
        });
        assert_eq!(
            lines,
            vec![
                "+ Create table: SportLinkCore",
                "  Partition key: EntityId (S)",
                "  Sort key: Id (S)",
                "  + TTL on: ExpiresAt",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(None, "SportLinkCore"),
            DestroyPlan::AlreadyGone {
                table_name: "SportLinkCore".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(Some(&active(None)), "SportLinkCore"),
            DestroyPlan::DeleteTable {
                table_name: "SportLinkCore".to_string()
            }
        );
    }
}
