//! Query expressions for the single-table store.
//!
//! A [`QueryExpression`] is a key condition plus an AND-chain of filter
//! conditions. It can be rendered into DynamoDB expression strings with
//! `#name` / `:value` placeholders, or evaluated directly against an item.

use std::cmp::Ordering;
use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use super::keys::{PARTITION_KEY, SORT_KEY};
use super::store::Item;

/// Partition equality plus an optional `begins_with` on the sort key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    pub partition: String,
    pub sort_prefix: Option<String>,
}

/// Comparison applied to one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    In(Vec<AttributeValue>),
    Equals(AttributeValue),
    AtLeast(AttributeValue),
    AtMost(AttributeValue),
}

/// One filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: &'static str,
    pub comparison: Comparison,
}

/// Builds a [`QueryExpression`].
#[derive(Debug, Clone)]
pub struct QueryFilterBuilder {
    key: KeyCondition,
    conditions: Vec<Condition>,
}

impl QueryFilterBuilder {
    /// Starts a query over `partition`.
    pub fn partition(partition: impl Into<String>) -> Self {
        Self {
            key: KeyCondition {
                partition: partition.into(),
                sort_prefix: None,
            },
            conditions: Vec::new(),
        }
    }

    pub fn sort_key_begins_with(mut self, prefix: impl Into<String>) -> Self {
        self.key.sort_prefix = Some(prefix.into());
        self
    }

    /// `attribute IN (values)`. No condition is added for an empty list.
    pub fn is_in(mut self, attribute: &'static str, values: Vec<AttributeValue>) -> Self {
        if !values.is_empty() {
            self.conditions.push(Condition {
                attribute,
                comparison: Comparison::In(values),
            });
        }
        self
    }

    pub fn equals(mut self, attribute: &'static str, value: AttributeValue) -> Self {
        self.conditions.push(Condition {
            attribute,
            comparison: Comparison::Equals(value),
        });
        self
    }

    pub fn at_least(mut self, attribute: &'static str, value: AttributeValue) -> Self {
        self.conditions.push(Condition {
            attribute,
            comparison: Comparison::AtLeast(value),
        });
        self
    }

    pub fn at_most(mut self, attribute: &'static str, value: AttributeValue) -> Self {
        self.conditions.push(Condition {
            attribute,
            comparison: Comparison::AtMost(value),
        });
        self
    }

    pub fn build(self) -> QueryExpression {
        QueryExpression {
            key: self.key,
            filter: self.conditions,
        }
    }
}

/// Key condition and filter of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpression {
    pub key: KeyCondition,
    pub filter: Vec<Condition>,
}

/// A [`QueryExpression`] in DynamoDB's expression syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedExpression {
    pub key_condition: String,
    pub filter: Option<String>,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl QueryExpression {
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    /// Same key condition with the filter dropped.
    pub fn without_filter(&self) -> Self {
        Self {
            key: self.key.clone(),
            filter: Vec::new(),
        }
    }

    pub fn render(&self) -> RenderedExpression {
        let mut names = HashMap::from([
            ("#pk".to_string(), PARTITION_KEY.to_string()),
        ]);
        let mut values = HashMap::from([(
            ":pk".to_string(),
            AttributeValue::S(self.key.partition.clone()),
        )]);

        let mut key_condition = "#pk = :pk".to_string();
        if let Some(prefix) = &self.key.sort_prefix {
            names.insert("#sk".to_string(), SORT_KEY.to_string());
            key_condition.push_str(" AND begins_with(#sk, :sk)");
            values.insert(":sk".to_string(), AttributeValue::S(prefix.clone()));
        }

        let clauses: Vec<String> = self
            .filter
            .iter()
            .enumerate()
            .map(|(index, condition)| {
                let name = format!("#f{index}");
                names.insert(name.clone(), condition.attribute.to_string());

                let mut placeholder = |suffix: usize, value: &AttributeValue| {
                    let key = format!(":f{index}_{suffix}");
                    values.insert(key.clone(), value.clone());
                    key
                };

                match &condition.comparison {
                    Comparison::In(candidates) => {
                        let list: Vec<String> = candidates
                            .iter()
                            .enumerate()
                            .map(|(i, value)| placeholder(i, value))
                            .collect();
                        format!("{name} IN ({})", list.join(", "))
                    }
                    Comparison::Equals(value) => format!("{name} = {}", placeholder(0, value)),
                    Comparison::AtLeast(value) => format!("{name} >= {}", placeholder(0, value)),
                    Comparison::AtMost(value) => format!("{name} <= {}", placeholder(0, value)),
                }
            })
            .collect();

        RenderedExpression {
            key_condition,
            filter: (!clauses.is_empty()).then(|| clauses.join(" AND ")),
            names,
            values,
        }
    }

    /// Returns true if `item` satisfies the key condition.
    pub fn key_matches(&self, item: &Item) -> bool {
        let partition_matches = item
            .get(PARTITION_KEY)
            .and_then(|value| value.as_s().ok())
            .is_some_and(|partition| *partition == self.key.partition);
        if !partition_matches {
            return false;
        }

        let sort = item.get(SORT_KEY).and_then(|value| value.as_s().ok());
        match (&self.key.sort_prefix, sort) {
            (None, _) => true,
            (Some(prefix), Some(sort)) => sort.starts_with(prefix.as_str()),
            (Some(_), None) => false,
        }
    }

    /// Returns true if `item` satisfies every filter condition. A missing
    /// attribute fails its condition.
    pub fn filter_matches(&self, item: &Item) -> bool {
        self.filter.iter().all(|condition| {
            let Some(actual) = item.get(condition.attribute) else {
                return false;
            };
            match &condition.comparison {
                Comparison::In(candidates) => candidates
                    .iter()
                    .any(|candidate| compare(actual, candidate) == Some(Ordering::Equal)),
                Comparison::Equals(expected) => compare(actual, expected) == Some(Ordering::Equal),
                Comparison::AtLeast(bound) => matches!(
                    compare(actual, bound),
                    Some(Ordering::Greater | Ordering::Equal)
                ),
                Comparison::AtMost(bound) => matches!(
                    compare(actual, bound),
                    Some(Ordering::Less | Ordering::Equal)
                ),
            }
        })
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.key_matches(item) && self.filter_matches(item)
    }
}

/// Orders two scalar values of the same type. Numbers compare numerically;
/// mismatched or non-scalar types are incomparable.
fn compare(left: &AttributeValue, right: &AttributeValue) -> Option<Ordering> {
    match (left, right) {
        (AttributeValue::S(left), AttributeValue::S(right)) => Some(left.cmp(right)),
        (AttributeValue::N(left), AttributeValue::N(right)) => {
            let left: f64 = left.parse().ok()?;
            let right: f64 = right.parse().ok()?;
            left.partial_cmp(&right)
        }
        (AttributeValue::Bool(left), AttributeValue::Bool(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, AttributeValue)]) -> Item {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn n(value: i64) -> AttributeValue {
        AttributeValue::N(value.to_string())
    }

    #[test]
    fn test_render_partition_only() {
        let rendered = QueryFilterBuilder::partition("Entity#MatchAnnouncement")
            .build()
            .render();

        assert_eq!(rendered.key_condition, "#pk = :pk");
        assert_eq!(rendered.filter, None);
        assert_eq!(rendered.names.get("#pk").map(String::as_str), Some("EntityId"));
        assert_eq!(
            rendered.values.get(":pk"),
            Some(&s("Entity#MatchAnnouncement"))
        );
    }

    #[test]
    fn test_render_sort_key_conditions() {
        let rendered = QueryFilterBuilder::partition("Entity#Team")
            .sort_key_begins_with("SPORT#Paddle")
            .build()
            .render();
        assert_eq!(
            rendered.key_condition,
            "#pk = :pk AND begins_with(#sk, :sk)"
        );
        assert_eq!(rendered.names.get("#sk").map(String::as_str), Some("Id"));

        let rendered = QueryFilterBuilder::partition("Entity#MatchAnnouncement")
            .build()
            .render();
        assert_eq!(rendered.key_condition, "#pk = :pk");
        assert!(!rendered.names.contains_key("#sk"));
    }

    #[test]
    fn test_render_and_chain() {
        let rendered = QueryFilterBuilder::partition("Entity#MatchAnnouncement")
            .is_in("Sport", vec![s("Paddle"), s("Tennis")])
            .at_least("Day", n(100))
            .equals("Country", s("Argentina"))
            .build()
            .render();

        assert_eq!(
            rendered.filter.as_deref(),
            Some("#f0 IN (:f0_0, :f0_1) AND #f1 >= :f1_0 AND #f2 = :f2_0")
        );
        assert_eq!(rendered.names.get("#f1").map(String::as_str), Some("Day"));
        assert_eq!(rendered.values.get(":f0_1"), Some(&s("Tennis")));
        assert_eq!(rendered.values.get(":f1_0"), Some(&n(100)));
    }

    #[test]
    fn test_empty_in_list_adds_no_condition() {
        let expression = QueryFilterBuilder::partition("Entity#MatchAnnouncement")
            .is_in("Sport", Vec::new())
            .build();
        assert!(!expression.has_filter());
    }

    #[test]
    fn test_key_matches() {
        let expression = QueryFilterBuilder::partition("Entity#Team")
            .sort_key_begins_with("SPORT#Paddle")
            .build();

        assert!(expression.key_matches(&item(&[
            ("EntityId", s("Entity#Team")),
            ("Id", s("SPORT#Paddle#NAME#Thunder")),
        ])));
        assert!(!expression.key_matches(&item(&[
            ("EntityId", s("Entity#Team")),
            ("Id", s("SPORT#Tennis#NAME#Thunder")),
        ])));
        assert!(!expression.key_matches(&item(&[
            ("EntityId", s("Entity#MatchAnnouncement")),
            ("Id", s("SPORT#Paddle#NAME#Thunder")),
        ])));
    }

    #[test]
    fn test_filter_matches_numbers_numerically() {
        let expression = QueryFilterBuilder::partition("p")
            .at_least("Day", n(9))
            .at_most("Day", n(100))
            .build();

        assert!(expression.filter_matches(&item(&[("Day", n(10))])));
        assert!(expression.filter_matches(&item(&[("Day", n(100))])));
        assert!(!expression.filter_matches(&item(&[("Day", n(101))])));
        assert!(!expression.filter_matches(&item(&[("Day", n(8))])));
    }

    #[test]
    fn test_filter_missing_or_mismatched_attribute_fails() {
        let expression = QueryFilterBuilder::partition("p")
            .is_in("Status", vec![s("PENDING")])
            .build();

        assert!(expression.filter_matches(&item(&[("Status", s("PENDING"))])));
        assert!(!expression.filter_matches(&item(&[("Status", s("EXPIRED"))])));
        assert!(!expression.filter_matches(&item(&[])));
        assert!(!expression.filter_matches(&item(&[("Status", n(1))])));
    }

    #[test]
    fn test_without_filter_keeps_key() {
        let expression = QueryFilterBuilder::partition("p")
            .sort_key_begins_with("x")
            .equals("Sport", s("Paddle"))
            .build();
        let bare = expression.without_filter();

        assert_eq!(bare.key, expression.key);
        assert!(!bare.has_filter());
    }
}
