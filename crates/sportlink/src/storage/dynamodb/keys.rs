//! DynamoDB key layout.
//!
//! Every entity lives in one table. The partition key names the entity type
//! and the sort key holds the entity's own id.

use sportlink_core::common::Sport;
use sportlink_core::team;
use ulid::Ulid;

/// Partition key attribute.
pub const PARTITION_KEY: &str = "EntityId";

/// Sort key attribute.
pub const SORT_KEY: &str = "Id";

/// Partition holding every match announcement.
pub const ANNOUNCEMENT_ENTITY: &str = "Entity#MatchAnnouncement";

/// Partition holding every team.
pub const TEAM_ENTITY: &str = "Entity#Team";

/// Sort key for an announcement.
pub fn announcement_sk(id: Ulid) -> String {
    id.to_string()
}

/// Sort key for a team.
///
/// Pattern: `SPORT#<sport>#NAME#<name>`
pub fn team_sk(sport: &Sport, name: &str) -> String {
    team::team_id(sport, name)
}

/// Sort-key prefix narrowing a team lookup.
///
/// With both a name and a sport the prefix pins the exact team; with only a
/// sport it selects that sport's teams; otherwise any team id.
pub fn team_sk_prefix(name: Option<&str>, sport: Option<&Sport>) -> String {
    match (name, sport) {
        (Some(name), Some(sport)) => team::team_id(sport, name),
        (None, Some(sport)) => team::sport_prefix(sport),
        _ => team::any_team_prefix().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announcement_sk_is_the_ulid() {
        let id = Ulid::from_string("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        assert_eq!(announcement_sk(id), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_team_sk() {
        assert_eq!(
            team_sk(&Sport::new("Football"), "Los Pumas"),
            "SPORT#Football#NAME#Los Pumas"
        );
    }

    #[test]
    fn test_team_sk_prefix() {
        let paddle = Sport::new("Paddle");
        assert_eq!(
            team_sk_prefix(Some("Thunder"), Some(&paddle)),
            "SPORT#Paddle#NAME#Thunder"
        );
        assert_eq!(team_sk_prefix(None, Some(&paddle)), "SPORT#Paddle");
        assert_eq!(team_sk_prefix(Some("Thunder"), None), "SPORT#");
        assert_eq!(team_sk_prefix(None, None), "SPORT#");
    }
}
