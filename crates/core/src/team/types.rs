use serde::{Deserialize, Serialize};

use crate::common::{Category, Sport};

const SPORT_PREFIX: &str = "SPORT#";
const NAME_SEPARATOR: &str = "#NAME#";

/// A team that may publish match announcements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// `SPORT#<sport>#NAME#<name>`.
    pub id: String,
    pub name: String,
    pub sport: Sport,
    pub category: Category,
}

impl Team {
    pub fn new(name: impl Into<String>, sport: Sport, category: Category) -> Self {
        let name = name.into();
        Self {
            id: team_id(&sport, &name),
            name,
            sport,
            category,
        }
    }
}

/// Builds the team identifier for `name` playing `sport`.
pub fn team_id(sport: &Sport, name: &str) -> String {
    format!("{SPORT_PREFIX}{sport}{NAME_SEPARATOR}{name}")
}

/// Prefix shared by every team id of `sport`.
pub fn sport_prefix(sport: &Sport) -> String {
    format!("{SPORT_PREFIX}{sport}")
}

/// Prefix shared by every team id.
pub fn any_team_prefix() -> &'static str {
    SPORT_PREFIX
}

/// Extracts the team name from an id. Ids not in the
/// `SPORT#<sport>#NAME#<name>` format are taken to be the name itself.
pub fn name_from_id(id: &str) -> &str {
    if !id.starts_with(SPORT_PREFIX) {
        return id;
    }
    match id.find(NAME_SEPARATOR) {
        Some(index) if index + NAME_SEPARATOR.len() < id.len() => {
            &id[index + NAME_SEPARATOR.len()..]
        }
        _ => id,
    }
}

/// Team lookup criteria. Every criterion is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamQuery {
    /// Exact team name.
    pub name: Option<String>,
    pub sports: Vec<Sport>,
    pub categories: Vec<Category>,
}

impl TeamQuery {
    /// Query for the single team `name` playing `sport`.
    pub fn exact(name: impl Into<String>, sport: Sport) -> Self {
        Self {
            name: Some(name.into()),
            sports: vec![sport],
            categories: Vec::new(),
        }
    }

    /// Returns true if `team` satisfies the name criterion.
    pub fn matches_name(&self, team: &Team) -> bool {
        self.name.as_deref().map_or(true, |name| team.name == name)
    }
}
