use sportlink_core::announcement::{
    AnnouncementValidator, CreateAnnouncementRequest, MatchAnnouncement,
};
use sportlink_core::storage::{AnnouncementRepository, TeamRepository};
use sportlink_core::team::TeamQuery;

use super::UseCaseError;

/// Publishes a new match announcement.
///
/// The request is parsed and validated first; the publishing team must then
/// exist for the announced sport before anything is written.
pub async fn create_announcement(
    validator: &AnnouncementValidator,
    teams: &dyn TeamRepository,
    announcements: &dyn AnnouncementRepository,
    request: CreateAnnouncementRequest,
) -> Result<MatchAnnouncement, UseCaseError> {
    let announcement = request.into_announcement(validator.now())?;
    validator
        .validate(&announcement)
        .map_err(UseCaseError::Validation)?;

    let query = TeamQuery::exact(announcement.team_name.clone(), announcement.sport.clone());
    let found = teams
        .find_teams(&query)
        .await
        .map_err(UseCaseError::TeamLookup)?;
    if found.is_empty() {
        tracing::debug!(
            team_name = %announcement.team_name,
            sport = %announcement.sport,
            "Team not found"
        );
        return Err(UseCaseError::TeamNotFound {
            name: announcement.team_name,
            sport: announcement.sport,
        });
    }

    announcements
        .save(&announcement)
        .await
        .map_err(UseCaseError::Save)?;

    tracing::info!(
        announcement_id = %announcement.id,
        team_name = %announcement.team_name,
        sport = %announcement.sport,
        "Created match announcement"
    );
    Ok(announcement)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use sportlink_core::announcement::{AnnouncementError, RequestError, Status};
    use sportlink_core::common::{Category, Sport};
    use sportlink_core::storage::{RepositoryError, StorePhase};
    use sportlink_core::team::{CreateTeamRequest, Team};
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::usecases::create_team;
    use crate::usecases::testing::{request, Unreachable};
    use crate::storage::{DynamoDbRepository, InMemoryTable};

    fn validator() -> AnnouncementValidator {
        let now: DateTime<Utc> = "2025-06-01T15:00:00Z".parse().unwrap();
        AnnouncementValidator::at(now)
    }

    async fn repository_with_team() -> DynamoDbRepository<InMemoryTable> {
        let repository = DynamoDbRepository::new(InMemoryTable::new());
        repository
            .save_team(&Team::new(
                "Thunder Strikers",
                Sport::new("Paddle"),
                Category::L4,
            ))
            .await
            .unwrap();
        repository
    }

    #[tokio::test]
    async fn test_creates_pending_announcement() {
        let repository = repository_with_team().await;

        let created = create_announcement(&validator(), &repository, &repository, request())
            .await
            .unwrap();

        assert_eq!(created.status, Status::Pending);
        assert_eq!(repository.get(created.id).await.unwrap(), Some(created.clone()));

        let page = repository
            .find(&Default::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(page.page.total, 1);
    }

    #[tokio::test]
    async fn test_unknown_team_is_rejected() {
        let repository = DynamoDbRepository::new(InMemoryTable::new());

        let error = create_announcement(&validator(), &repository, &repository, request())
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "team 'Thunder Strikers' for sport 'Paddle' does not exist"
        );
        assert_eq!(repository.store().len().await, 0);
    }

    #[tokio::test]
    async fn test_padded_team_name_matches_created_team() {
        let repository = DynamoDbRepository::new(InMemoryTable::new());
        let team_request: CreateTeamRequest = serde_json::from_value(serde_json::json!({
            "name": " Los Pumas ",
            "sport": "Paddle",
        }))
        .unwrap();
        create_team(&repository, team_request).await.unwrap();

        let mut padded = request();
        padded.team_name = " Los Pumas".to_string();
        let created = create_announcement(&validator(), &repository, &repository, padded)
            .await
            .unwrap();

        assert_eq!(created.team_name, "Los Pumas");
    }

    #[tokio::test]
    async fn test_team_of_another_sport_does_not_count() {
        let repository = DynamoDbRepository::new(InMemoryTable::new());
        repository
            .save_team(&Team::new("Thunder Strikers", Sport::new("Tennis"), Category::L4))
            .await
            .unwrap();

        let error = create_announcement(&validator(), &repository, &repository, request())
            .await
            .unwrap_err();

        assert!(matches!(error, UseCaseError::TeamNotFound { .. }));
    }

    #[tokio::test]
    async fn test_validation_runs_before_team_lookup() {
        let mut past = request();
        past.day = "2025-05-30".to_string();

        let error = create_announcement(&validator(), &Unreachable, &Unreachable, past)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            UseCaseError::Validation(AnnouncementError::DayInPast)
        ));
    }

    #[tokio::test]
    async fn test_malformed_request_is_rejected() {
        let mut malformed = request();
        malformed.day = "10/06/2025".to_string();

        let error = create_announcement(&validator(), &Unreachable, &Unreachable, malformed)
            .await
            .unwrap_err();

        assert!(matches!(error, UseCaseError::Request(RequestError::Day(_))));
    }

    #[tokio::test]
    async fn test_team_lookup_failure_is_distinct_from_missing_team() {
        let error = create_announcement(&validator(), &Unreachable, &Unreachable, request())
            .await
            .unwrap_err();

        match error {
            UseCaseError::TeamLookup(source) => {
                assert_eq!(source.phase(), Some(StorePhase::Lookup));
                assert_eq!(
                    source.root(),
                    &RepositoryError::ConnectionFailed("unreachable".to_string())
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
