//! Admission rules deciding which skill levels may join a match.

use std::fmt;
use std::str::FromStr;

use crate::common::Category;

use super::AnnouncementError;

/// Tag naming the kind of a [`CategoryRange`], as persisted and received
/// over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeType {
    Specific,
    GreaterThan,
    LessThan,
    Between,
}

impl RangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeType::Specific => "SPECIFIC",
            RangeType::GreaterThan => "GREATER_THAN",
            RangeType::LessThan => "LESS_THAN",
            RangeType::Between => "BETWEEN",
        }
    }
}

impl FromStr for RangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPECIFIC" => Ok(RangeType::Specific),
            "GREATER_THAN" => Ok(RangeType::GreaterThan),
            "LESS_THAN" => Ok(RangeType::LessThan),
            "BETWEEN" => Ok(RangeType::Between),
            other => Err(format!("invalid category range type: {other}")),
        }
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `min..=max` bounds. Only constructible with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryBounds {
    min: Category,
    max: Category,
}

impl CategoryBounds {
    pub fn new(min: Category, max: Category) -> Result<Self, AnnouncementError> {
        if min > max {
            return Err(AnnouncementError::InvalidCategoryBounds);
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Category {
        self.min
    }

    pub fn max(&self) -> Category {
        self.max
    }
}

/// Categories admitted to a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRange {
    /// Only the listed categories (e.g. only L5 and L7).
    Specific(Vec<Category>),
    /// Categories at or above the level (e.g. >= L5).
    GreaterThan(Category),
    /// Categories at or below the level (e.g. <= L5).
    LessThan(Category),
    /// Categories inside inclusive bounds (e.g. L3 to L6).
    Between(CategoryBounds),
}

impl CategoryRange {
    pub fn specific(categories: impl Into<Vec<Category>>) -> Self {
        CategoryRange::Specific(categories.into())
    }

    pub fn greater_than(min: Category) -> Self {
        CategoryRange::GreaterThan(min)
    }

    pub fn less_than(max: Category) -> Self {
        CategoryRange::LessThan(max)
    }

    /// Fails when `min > max`.
    pub fn between(min: Category, max: Category) -> Result<Self, AnnouncementError> {
        CategoryBounds::new(min, max).map(CategoryRange::Between)
    }

    pub fn range_type(&self) -> RangeType {
        match self {
            CategoryRange::Specific(_) => RangeType::Specific,
            CategoryRange::GreaterThan(_) => RangeType::GreaterThan,
            CategoryRange::LessThan(_) => RangeType::LessThan,
            CategoryRange::Between(_) => RangeType::Between,
        }
    }

    /// Lower bound, for the kinds that carry one.
    pub fn min_level(&self) -> Option<Category> {
        match self {
            CategoryRange::GreaterThan(min) => Some(*min),
            CategoryRange::Between(bounds) => Some(bounds.min()),
            _ => None,
        }
    }

    /// Upper bound, for the kinds that carry one.
    pub fn max_level(&self) -> Option<Category> {
        match self {
            CategoryRange::LessThan(max) => Some(*max),
            CategoryRange::Between(bounds) => Some(bounds.max()),
            _ => None,
        }
    }

    /// Listed categories for `Specific`, empty otherwise.
    pub fn categories(&self) -> &[Category] {
        match self {
            CategoryRange::Specific(categories) => categories,
            _ => &[],
        }
    }

    /// Returns true if a player of `category` may join.
    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryRange::Specific(categories) => categories.contains(&category),
            CategoryRange::GreaterThan(min) => category >= *min,
            CategoryRange::LessThan(max) => category <= *max,
            CategoryRange::Between(bounds) => bounds.min() <= category && category <= bounds.max(),
        }
    }

    /// Returns true if at least one of `categories` is admitted.
    pub fn admits_any(&self, categories: &[Category]) -> bool {
        categories.iter().any(|category| self.admits(*category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    #[test]
    fn test_admits_table() {
        let cases = [
            (CategoryRange::specific([L5, L6, L7]), L5, true),
            (CategoryRange::specific([L5, L6, L7]), L4, false),
            (CategoryRange::greater_than(L5), L5, true),
            (CategoryRange::greater_than(L5), L4, false),
            (CategoryRange::less_than(L3), L3, true),
            (CategoryRange::less_than(L3), L4, false),
            (CategoryRange::between(L3, L6).unwrap(), L3, true),
            (CategoryRange::between(L3, L6).unwrap(), L6, true),
            (CategoryRange::between(L3, L6).unwrap(), L2, false),
            (CategoryRange::between(L3, L6).unwrap(), L7, false),
        ];

        for (range, category, expected) in cases {
            assert_eq!(
                range.admits(category),
                expected,
                "{range:?} admits {category}"
            );
        }
    }

    #[test]
    fn test_specific_membership_ignores_order() {
        let range = CategoryRange::specific([L7, L2, L5]);
        assert!(range.admits(L2));
        assert!(!range.admits(L3));
    }

    #[test]
    fn test_empty_specific_admits_nothing() {
        let range = CategoryRange::specific(Vec::new());
        assert!(Category::ALL.iter().all(|c| !range.admits(*c)));
    }

    #[test]
    fn test_between_rejects_inverted_bounds() {
        assert_eq!(
            CategoryRange::between(L6, L3),
            Err(AnnouncementError::InvalidCategoryBounds)
        );
        assert!(CategoryRange::between(L3, L6).is_ok());
        assert!(CategoryRange::between(L4, L4).is_ok());
    }

    #[test]
    fn test_admits_is_repeatable() {
        let range = CategoryRange::between(L3, L6).unwrap();
        let first = range.admits(L4);
        let second = range.admits(L4);
        assert_eq!(first, second);
        assert_eq!(range, CategoryRange::between(L3, L6).unwrap());
    }

    #[test]
    fn test_admits_any() {
        let range = CategoryRange::greater_than(L5);
        assert!(range.admits_any(&[L1, L6]));
        assert!(!range.admits_any(&[L1, L2]));
        assert!(!range.admits_any(&[]));
    }

    #[test]
    fn test_bound_accessors() {
        let between = CategoryRange::between(L2, L4).unwrap();
        assert_eq!(between.min_level(), Some(L2));
        assert_eq!(between.max_level(), Some(L4));
        assert_eq!(between.range_type(), RangeType::Between);

        let specific = CategoryRange::specific([L1]);
        assert_eq!(specific.min_level(), None);
        assert_eq!(specific.categories(), &[L1]);
    }

    #[test]
    fn test_range_type_round_trip_and_rejects_unknown() {
        for tag in ["SPECIFIC", "GREATER_THAN", "LESS_THAN", "BETWEEN"] {
            assert_eq!(tag.parse::<RangeType>().unwrap().as_str(), tag);
        }
        assert!("AROUND".parse::<RangeType>().is_err());
    }
}
