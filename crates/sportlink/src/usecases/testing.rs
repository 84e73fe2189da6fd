//! Fixtures shared by the use case tests.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use ulid::Ulid;

use sportlink_core::announcement::{
    AnnouncementQuery, CategoryRangeInput, CreateAnnouncementRequest, Location,
    MatchAnnouncement, TimeSlotInput,
};
use sportlink_core::storage::{
    AnnouncementRepository, Page, RepositoryError, Result, StorePhase, TeamRepository,
};
use sportlink_core::team::{Team, TeamQuery};

/// A valid request for 2025-06-10, for the registered team "Thunder Strikers".
pub fn request() -> CreateAnnouncementRequest {
    CreateAnnouncementRequest {
        team_name: "Thunder Strikers".to_string(),
        sport: "Paddle".to_string(),
        day: "2025-06-10".to_string(),
        time_slot: TimeSlotInput {
            start_time: "2025-06-10T18:00:00".to_string(),
            end_time: "2025-06-10T20:00:00".to_string(),
        },
        location: Location::new("Argentina", "Buenos Aires", "CABA"),
        admitted_categories: CategoryRangeInput {
            range_type: "BETWEEN".to_string(),
            categories: Vec::new(),
            min_level: Some(3),
            max_level: Some(6),
        },
    }
}

fn unreachable(phase: StorePhase) -> RepositoryError {
    RepositoryError::ConnectionFailed("unreachable".to_string()).in_phase(phase)
}

/// Repositories whose store cannot be reached.
pub struct Unreachable;

#[async_trait]
impl TeamRepository for Unreachable {
    async fn save_team(&self, _team: &Team) -> Result<()> {
        Err(unreachable(StorePhase::Save))
    }

    async fn find_teams(&self, _query: &TeamQuery) -> Result<Vec<Team>> {
        Err(unreachable(StorePhase::Lookup))
    }
}

#[async_trait]
impl AnnouncementRepository for Unreachable {
    async fn save(&self, _announcement: &MatchAnnouncement) -> Result<()> {
        Err(unreachable(StorePhase::Save))
    }

    async fn get(&self, _id: Ulid) -> Result<Option<MatchAnnouncement>> {
        Err(unreachable(StorePhase::Lookup))
    }

    async fn find(
        &self,
        _query: &AnnouncementQuery,
        _cancel: &CancellationToken,
    ) -> Result<Page<MatchAnnouncement>> {
        Err(unreachable(StorePhase::Count))
    }
}
