//! Seed command implementation.

use super::error::{DynamodbError, Result};
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use sportlink_core::common::{Category, Sport};
use sportlink_core::team::Team;
use std::collections::HashMap;

const TEAM_NAMES: [&str; 10] = [
    "Thunder Strikers",
    "Los Pumas",
    "Boca Junior",
    "River Rovers",
    "Palermo Smash",
    "Delta Eagles",
    "Norte Kings",
    "Rosario Volley",
    "Sur Titans",
    "Tigre Waves",
];

/// Generate demo teams for each sport, spreading categories across levels.
pub fn generate_seed_teams(sports: &[Sport], count_per_sport: u32) -> Vec<Team> {
    let levels = &Category::ALL[1..];
    let mut teams = Vec::with_capacity(sports.len() * count_per_sport as usize);

    for sport in sports {
        for i in 0..count_per_sport as usize {
            let base = TEAM_NAMES[i % TEAM_NAMES.len()];
            let name = match i / TEAM_NAMES.len() {
                0 => base.to_string(),
                round => format!("{} {}", base, round + 1),
            };
            teams.push(Team::new(name, sport.clone(), levels[i % levels.len()]));
        }
    }

    teams
}

/// Convert a team to its DynamoDB item.
fn team_to_item(team: &Team) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "EntityId".to_string(),
            AttributeValue::S("Entity#Team".to_string()),
        ),
        ("Id".to_string(), AttributeValue::S(team.id.clone())),
        (
            "Sport".to_string(),
            AttributeValue::S(team.sport.as_str().to_string()),
        ),
        (
            "Category".to_string(),
            AttributeValue::N(i64::from(team.category).to_string()),
        ),
    ])
}

/// Resubmissions of unprocessed writes per batch before giving up.
const MAX_BATCH_ATTEMPTS: usize = 3;

/// Insert teams into DynamoDB, returning how many were written.
///
/// Writes DynamoDB leaves unprocessed (throttling) are resubmitted; any
/// still pending after the last attempt are not counted.
pub async fn seed_teams(client: &Client, table_name: &str, teams: &[Team]) -> Result<u32> {
    let mut inserted = 0;

    // Use batch write for efficiency (25 items per batch max)
    for chunk in teams.chunks(25) {
        let mut pending = chunk
            .iter()
            .map(|team| {
                PutRequest::builder()
                    .set_item(Some(team_to_item(team)))
                    .build()
                    .map(|put| WriteRequest::builder().put_request(put).build())
                    .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        for _ in 0..MAX_BATCH_ATTEMPTS {
            let output = client
                .batch_write_item()
                .request_items(table_name, pending)
                .send()
                .await
                .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

            pending = unprocessed_for(output.unprocessed_items, table_name);
            if pending.is_empty() {
                break;
            }
        }

        inserted += (chunk.len() - pending.len()) as u32;
    }

    Ok(inserted)
}

/// Writes DynamoDB reported back as unprocessed for `table_name`.
fn unprocessed_for(
    unprocessed: Option<HashMap<String, Vec<WriteRequest>>>,
    table_name: &str,
) -> Vec<WriteRequest> {
    unprocessed
        .and_then(|mut tables| tables.remove(table_name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_teams_per_sport() {
        let sports = [Sport::new("Paddle"), Sport::new("Football")];
        let teams = generate_seed_teams(&sports, 3);

        assert_eq!(teams.len(), 6);
        assert_eq!(teams[0].id, "SPORT#Paddle#NAME#Thunder Strikers");
        assert_eq!(teams[0].category, Category::L1);
        assert_eq!(teams[2].category, Category::L3);
        assert_eq!(teams[3].id, "SPORT#Football#NAME#Thunder Strikers");
    }

    #[test]
    fn test_names_stay_unique_past_the_name_list() {
        let teams = generate_seed_teams(&[Sport::new("Tennis")], 12);

        assert_eq!(teams[10].name, "Thunder Strikers 2");
        assert_eq!(teams[11].name, "Los Pumas 2");
    }

    #[test]
    fn test_unprocessed_writes_are_picked_per_table() {
        let write = || {
            let put = PutRequest::builder()
                .set_item(Some(team_to_item(&Team::new(
                    "Los Pumas",
                    Sport::new("Football"),
                    Category::L5,
                ))))
                .build()
                .unwrap();
            WriteRequest::builder().put_request(put).build()
        };
        let unprocessed = HashMap::from([
            ("SportLinkCore".to_string(), vec![write(), write()]),
            ("Other".to_string(), vec![write()]),
        ]);

        assert_eq!(unprocessed_for(Some(unprocessed), "SportLinkCore").len(), 2);
        assert!(unprocessed_for(None, "SportLinkCore").is_empty());
    }

    #[test]
    fn test_team_item_layout() {
        let team = Team::new("Los Pumas", Sport::new("Football"), Category::L5);
        let item = team_to_item(&team);

        assert_eq!(
            item.get("EntityId"),
            Some(&AttributeValue::S("Entity#Team".to_string()))
        );
        assert_eq!(
            item.get("Id"),
            Some(&AttributeValue::S("SPORT#Football#NAME#Los Pumas".to_string()))
        );
        assert_eq!(item.get("Category"), Some(&AttributeValue::N("5".to_string())));
    }
}
