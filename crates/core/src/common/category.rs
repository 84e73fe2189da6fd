use std::fmt;

use serde::{Deserialize, Serialize};

use super::CategoryError;

/// Skill level shared by players, teams and match admission rules.
///
/// Levels are ordered numerically, so `Category::L3 < Category::L5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum Category {
    Unranked = 0,
    L1 = 1,
    L2 = 2,
    L3 = 3,
    L4 = 4,
    L5 = 5,
    L6 = 6,
    L7 = 7,
}

impl Category {
    /// All categories from lowest to highest.
    pub const ALL: [Category; 8] = [
        Category::Unranked,
        Category::L1,
        Category::L2,
        Category::L3,
        Category::L4,
        Category::L5,
        Category::L6,
        Category::L7,
    ];

    /// Numeric level of this category.
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl TryFrom<i64> for Category {
    type Error = CategoryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Category::ALL.get(idx).copied())
            .ok_or(CategoryError::OutOfRange(value))
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> Self {
        i64::from(category.level())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Unranked => write!(f, "Unranked"),
            other => write!(f, "L{}", other.level()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_accepts_bounds() {
        assert_eq!(Category::try_from(0).unwrap(), Category::Unranked);
        assert_eq!(Category::try_from(7).unwrap(), Category::L7);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Category::try_from(8), Err(CategoryError::OutOfRange(8)));
        assert_eq!(Category::try_from(-1), Err(CategoryError::OutOfRange(-1)));
    }

    #[test]
    fn test_ordering_follows_level() {
        assert!(Category::L3 < Category::L5);
        assert!(Category::Unranked < Category::L1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Category::Unranked.to_string(), "Unranked");
        assert_eq!(Category::L5.to_string(), "L5");
    }

    #[test]
    fn test_serde_uses_numeric_level() {
        let json = serde_json::to_string(&Category::L4).unwrap();
        assert_eq!(json, "4");

        let parsed: Category = serde_json::from_str("6").unwrap();
        assert_eq!(parsed, Category::L6);
        assert!(serde_json::from_str::<Category>("12").is_err());
    }
}
