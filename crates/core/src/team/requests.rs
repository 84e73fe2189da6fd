use serde::Deserialize;

use crate::common::{Category, Sport};

use super::{Team, TeamError};

/// Body of a team registration.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub sport: Sport,
    #[serde(default = "unranked")]
    pub category: Category,
}

fn unranked() -> Category {
    Category::Unranked
}

impl CreateTeamRequest {
    /// Builds the team, trimming the name.
    pub fn into_team(self) -> Result<Team, TeamError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TeamError::EmptyName);
        }
        if self.sport.is_empty() {
            return Err(TeamError::EmptySport);
        }
        Ok(Team::new(name, self.sport, self.category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_team_builds_id() {
        let request: CreateTeamRequest = serde_json::from_str(
            r#"{"name":" Los Pumas ","sport":"Football","category":3}"#,
        )
        .unwrap();

        let team = request.into_team().unwrap();
        assert_eq!(team.name, "Los Pumas");
        assert_eq!(team.id, "SPORT#Football#NAME#Los Pumas");
        assert_eq!(team.category, Category::L3);
    }

    #[test]
    fn test_category_defaults_to_unranked() {
        let request: CreateTeamRequest =
            serde_json::from_str(r#"{"name":"Los Pumas","sport":"Football"}"#).unwrap();
        assert_eq!(request.into_team().unwrap().category, Category::Unranked);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let blank_name = CreateTeamRequest {
            name: "  ".to_string(),
            sport: Sport::new("Football"),
            category: Category::L1,
        };
        assert_eq!(blank_name.into_team(), Err(TeamError::EmptyName));

        let blank_sport = CreateTeamRequest {
            name: "Los Pumas".to_string(),
            sport: Sport::new(""),
            category: Category::L1,
        };
        assert_eq!(blank_sport.into_team(), Err(TeamError::EmptySport));
    }

    #[test]
    fn test_out_of_range_category_fails_to_parse() {
        let result: Result<CreateTeamRequest, _> =
            serde_json::from_str(r#"{"name":"Los Pumas","sport":"Football","category":9}"#);
        assert!(result.is_err());
    }
}
